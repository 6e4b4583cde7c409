use yew::Html;

use crate::route::Location;

/// JSON string literal that is safe inside an inline `<script>`.
pub fn script_literal(value: &str) -> String {
    serde_json::Value::String(value.to_owned())
        .to_string()
        .replace("</", "<\\/")
}

/// Client side of the `data-action` bindings. Every location is its own
/// document (see `document_path`), so actions and hash changes load the
/// document of their target unless it is already showing.
const BINDINGS: &str = r#"
    const normalize = (fragment) => {
        fragment = fragment.replace(/^#/, '');
        if (fragment.startsWith('blog/') && fragment.length > 'blog/'.length) {
            return fragment;
        }
        return ['about', 'blog', 'resume'].includes(fragment) ? fragment : 'about';
    };
    const documentPath = (fragment, page) => {
        if (fragment.startsWith('blog/')) {
            return '/' + fragment + '/';
        }
        if (fragment === 'blog' && page > 1) {
            return '/blog/page/' + page + '/';
        }
        return fragment === 'about' ? '/' : '/' + fragment + '/';
    };
    const go = (fragment, page) => {
        fragment = normalize(fragment);
        page = page || 1;
        if (fragment === current && (fragment !== 'blog' || page === currentPage)) {
            return;
        }
        window.location.assign(documentPath(fragment, page) + '#' + fragment);
    };
    document.addEventListener('click', (event) => {
        const target = event.target.closest('[data-action]');
        if (!target) {
            return;
        }
        const binding = target.dataset.action;
        const separator = binding.indexOf(':');
        const kind = separator < 0 ? binding : binding.slice(0, separator);
        const argument = separator < 0 ? '' : binding.slice(separator + 1);
        event.preventDefault();
        if (kind === 'navigate') {
            go(argument);
        } else if (kind === 'post') {
            go('blog/' + argument);
        } else if (kind === 'page') {
            go('blog', Number(argument));
        } else if (kind === 'print') {
            window.print();
        }
    });
    window.addEventListener('hashchange', () => go(window.location.hash));
    document.addEventListener('keydown', (event) => {
        if ((event.ctrlKey || event.metaKey) && event.key.toLowerCase() === 'p' && current === 'resume') {
            event.preventDefault();
            window.print();
        }
    });
    if (window.location.hash) {
        go(window.location.hash);
    }
"#;

/// Binds the rendered actions for the document showing `location` at
/// listing `page`.
pub fn bindings_script(location: &Location, page: usize) -> Html {
    Html::from_html_unchecked(
        format!(
            "<script>\n(() => {{\n    const current = {};\n    const currentPage = {page};\n{BINDINGS}}})();\n</script>",
            script_literal(&location.to_string()),
        )
        .into(),
    )
}

/// Opens the print dialog once the document has loaded.
pub fn print_script() -> Html {
    Html::from_html_unchecked(
        "<script>window.addEventListener('load', () => window.print());</script>".into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_cannot_close_the_script() {
        assert_eq!(script_literal("/sw.js"), r#""/sw.js""#);
        let literal = script_literal("/sw.js</script><script>alert(1)</script>");
        assert!(!literal.contains("</script>"));
        assert_eq!(literal, r#""/sw.js<\/script><script>alert(1)<\/script>""#);
    }

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(script_literal(r#"a"b"#), r#""a\"b""#);
    }
}
