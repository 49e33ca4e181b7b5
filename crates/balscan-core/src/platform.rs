//! Forwarding scan results to reporting platforms.

use crate::config::PlatformConfig;
use crate::types::Issue;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// What a platform is told before it receives issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformContext {
    /// Arguments from the platform's `[[platform]]` entry.
    pub args: BTreeMap<String, String>,
    /// Whether the scan was started by the platform itself.
    pub initiated_by_platform: bool,
}

/// A sink for final scan results.
pub trait PlatformPlugin {
    /// Name matched against `[[platform]]` entries and `--platforms`.
    fn name(&self) -> &str;

    /// Called once before [`PlatformPlugin::on_scan`].
    fn init(&mut self, context: &PlatformContext);

    /// Receives the final issue list.
    fn on_scan(&mut self, issues: &[Issue]);
}

/// Type alias for boxed platform plugins.
pub type PlatformPluginBox = Box<dyn PlatformPlugin>;

/// Hands `issues` to every requested platform.
///
/// Returns the requested names that no plugin answered to.
pub fn forward(
    plugins: &mut [PlatformPluginBox],
    configs: &[PlatformConfig],
    requested: &[String],
    initiated_by_platform: bool,
    issues: &[Issue],
) -> Vec<String> {
    let mut unavailable = Vec::new();

    for name in requested {
        let Some(plugin) = plugins.iter_mut().find(|p| p.name() == name) else {
            warn!("Platform not available: {}", name);
            unavailable.push(name.clone());
            continue;
        };

        let args = configs
            .iter()
            .find(|c| &c.name == name)
            .map(|c| c.args.clone())
            .unwrap_or_default();
        let context = PlatformContext {
            args,
            initiated_by_platform,
        };

        info!("Reporting {} issues to platform {}", issues.len(), name);
        plugin.init(&context);
        plugin.on_scan(issues);
    }

    unavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Seen {
        context: Option<PlatformContext>,
        issues: Option<usize>,
    }

    struct Recording {
        name: &'static str,
        seen: Rc<RefCell<Seen>>,
    }

    impl PlatformPlugin for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&mut self, context: &PlatformContext) {
            self.seen.borrow_mut().context = Some(context.clone());
        }

        fn on_scan(&mut self, issues: &[Issue]) {
            self.seen.borrow_mut().issues = Some(issues.len());
        }
    }

    #[test]
    fn forwards_to_requested_platforms() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut plugins: Vec<PlatformPluginBox> = vec![Box::new(Recording {
            name: "sonarqube",
            seen: Rc::clone(&seen),
        })];
        let configs = vec![PlatformConfig {
            name: "sonarqube".into(),
            path: None,
            args: BTreeMap::from([("sonarProjectKey".to_string(), "demo".to_string())]),
        }];

        let unavailable = forward(
            &mut plugins,
            &configs,
            &["sonarqube".to_string(), "codeql".to_string()],
            true,
            &[],
        );

        assert_eq!(unavailable, vec!["codeql".to_string()]);
        let seen = seen.borrow();
        let context = seen.context.as_ref().unwrap();
        assert!(context.initiated_by_platform);
        assert_eq!(context.args.get("sonarProjectKey").map(String::as_str), Some("demo"));
        assert_eq!(seen.issues, Some(0));
    }

    #[test]
    fn unrequested_platforms_are_left_alone() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut plugins: Vec<PlatformPluginBox> = vec![Box::new(Recording {
            name: "sonarqube",
            seen: Rc::clone(&seen),
        })];

        let unavailable = forward(&mut plugins, &[], &[], false, &[]);

        assert!(unavailable.is_empty());
        assert!(seen.borrow().context.is_none());
    }
}
