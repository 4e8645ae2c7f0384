use std::collections::HashMap;

use crate::setting::AI_MODEL_KEY;
use crate::store::SettingsStore;

pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
pub const MODEL_ENV_VAR: &str = "CLAUDE_MODEL";

/// Read access to environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Picks the model: stored `ai_model` setting, then `CLAUDE_MODEL`, then the default.
///
/// Empty values are skipped. A failing settings lookup is logged and treated
/// as absent.
pub async fn resolve_model<S>(settings: &S, env: &dyn EnvSource) -> String
where
    S: SettingsStore + ?Sized,
{
    match settings.setting(AI_MODEL_KEY).await {
        Ok(Some(setting)) if !setting.value.trim().is_empty() => return setting.value.trim().to_string(),
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "could not read AI model setting, falling back"),
    }

    env.var(MODEL_ENV_VAR)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
