use serde::Serialize;
use yew::Html;

use crate::{config::SiteConfig, output::script_literal};

pub fn write_manifest(config: &SiteConfig) -> Vec<u8> {
    let manifest = Manifest {
        name: config.title.clone(),
        description: config.description.clone(),
        display: "standalone".to_owned(),
        start_url: "/#about".to_owned(),
        handle_links: "not-preferred".to_owned(),
    };

    serde_json::to_vec(&manifest).unwrap_or_default()
}

#[derive(Serialize)]
struct Manifest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    display: String,
    start_url: String,
    handle_links: String,
}

/// Offline caching is the worker's business; the page only registers it.
pub fn service_worker_registration(config: &SiteConfig) -> Option<Html> {
    let worker = config.service_worker.as_deref().filter(|w| !w.is_empty())?;
    Some(Html::from_html_unchecked(registration_script(worker).into()))
}

fn registration_script(worker: &str) -> String {
    format!(
        r#"<script>
if ('serviceWorker' in navigator) {{
    window.addEventListener('load', () => {{
        navigator.serviceWorker.register({})
            .then(registration => console.log('SW registered: ', registration))
            .catch(error => console.log('SW registration failed: ', error));
    }});
}}
</script>"#,
        script_literal(worker)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_uses_site_title() {
        let config = SiteConfig {
            title: "Ada Lovelace".to_owned(),
            ..SiteConfig::default()
        };
        let manifest: serde_json::Value = serde_json::from_slice(&write_manifest(&config)).unwrap();
        assert_eq!(manifest["name"], "Ada Lovelace");
        assert!(manifest.get("description").is_none());
    }

    #[test]
    fn registration_can_be_disabled() {
        let config = SiteConfig {
            service_worker: Some(String::new()),
            ..SiteConfig::default()
        };
        assert!(service_worker_registration(&config).is_none());
        assert!(service_worker_registration(&SiteConfig::default()).is_some());
    }

    #[test]
    fn registration_keeps_worker_path_inside_script() {
        let script = registration_script("/sw.js</script><script>alert(1)");
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with("</script>"));
        assert!(registration_script("/sw.js").contains(r#"register("/sw.js")"#));
    }
}
