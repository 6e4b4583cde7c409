use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "title")]
    pub headline: String,
    #[serde(default, alias = "bio")]
    pub summary: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<SocialLink>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    /// Icon name, rendered by the icon refresh pass.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "tags")]
    pub technologies: Vec<String>,
    #[serde(default, alias = "url")]
    pub link: Option<String>,
    #[serde(default, alias = "github")]
    pub repository: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_accepts_partial_records() {
        let about: AboutInfo =
            serde_json::from_str(r#"{"name": "Ada", "bio": "Writes engines."}"#).unwrap();
        assert_eq!(about.name, "Ada");
        assert_eq!(about.summary, "Writes engines.");
        assert!(about.links.is_empty());
    }

    #[test]
    fn project_aliases() {
        let project: Project = serde_json::from_str(
            r#"{"title": "Engine", "tags": ["rust"], "github": "https://github.com/a/b"}"#,
        )
        .unwrap();
        assert_eq!(project.technologies, vec!["rust".to_owned()]);
        assert_eq!(project.repository.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(project.link, None);
    }
}
