use std::fmt;

use crate::route::Section;

/// Something the user can do. Rendered views carry these as `data-action`
/// bindings instead of inline handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Section),
    OpenPost(String),
    ChangePage(usize),
    /// Back/forward navigation; the address bar already changed.
    RouteChanged,
    Print,
}

impl Action {
    pub fn binding(&self) -> String {
        self.to_string()
    }

    pub fn from_binding(binding: &str) -> Option<Self> {
        let (kind, argument) = binding
            .split_once(':')
            .map(|(kind, argument)| (kind, Some(argument)))
            .unwrap_or((binding, None));
        match (kind, argument) {
            ("navigate", Some(section)) => section.parse().ok().map(Self::Navigate),
            ("post", Some(id)) if !id.is_empty() => Some(Self::OpenPost(id.to_owned())),
            ("page", Some(page)) => page.parse().ok().map(Self::ChangePage),
            ("route-changed", None) => Some(Self::RouteChanged),
            ("print", None) => Some(Self::Print),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(section) => write!(f, "navigate:{section}"),
            Self::OpenPost(id) => write!(f, "post:{id}"),
            Self::ChangePage(page) => write!(f, "page:{page}"),
            Self::RouteChanged => f.write_str("route-changed"),
            Self::Print => f.write_str("print"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_parse_back() {
        for action in [
            Action::Navigate(Section::Resume),
            Action::OpenPost("rust-notes".to_owned()),
            Action::ChangePage(3),
            Action::RouteChanged,
            Action::Print,
        ] {
            assert_eq!(Action::from_binding(&action.binding()), Some(action));
        }
    }

    #[test]
    fn post_ids_may_contain_colons() {
        assert_eq!(
            Action::from_binding("post:2024:recap"),
            Some(Action::OpenPost("2024:recap".to_owned()))
        );
    }

    #[test]
    fn rejects_malformed_bindings() {
        for binding in ["", "navigate:contact", "page:two", "post:", "print:now", "alert"] {
            assert_eq!(Action::from_binding(binding), None, "{binding}");
        }
    }
}
