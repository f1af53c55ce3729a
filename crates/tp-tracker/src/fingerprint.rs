use tp_adapters::EnvironmentReader;
use tp_core::EnvironmentFingerprint;

/// Snapshot the device properties the environment exposes, as-is.
pub fn collect(env: &dyn EnvironmentReader) -> EnvironmentFingerprint {
    EnvironmentFingerprint {
        screen_width: env.screen_width(),
        screen_height: env.screen_height(),
        timezone: env.timezone(),
        language: env.language(),
        platform: env.platform(),
    }
}
