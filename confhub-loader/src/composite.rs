//! Loading the app and logger documents together.

use confhub_primitives::{ConfigDocument, TextTransform};
use confhub_stores::{select_backend, select_backend_with};

use crate::error::LoadResult;
use crate::loader::ConfigLoader;

/// App and logger documents fetched from one backend.
#[derive(Clone, Debug, PartialEq)]
pub struct AppAndLoggerConfig {
    /// Application config, loaded without a transform.
    pub app: ConfigDocument,
    /// Logger config, loaded with the caller's transform.
    pub logger: ConfigDocument,
}

impl ConfigLoader {
    /// Loads `app_file` and `logger_file` concurrently through this loader.
    ///
    /// # Errors
    ///
    /// Fails with the first error from either load.
    pub async fn load_app_and_logger(
        &self,
        app_file: &str,
        logger_file: &str,
        logger_transform: Option<&dyn TextTransform>,
    ) -> LoadResult<AppAndLoggerConfig> {
        let (app, logger) = futures::try_join!(
            self.load(app_file, None),
            self.load(logger_file, logger_transform),
        )?;
        Ok(AppAndLoggerConfig { app, logger })
    }
}

/// Selects the backend named by `mode` and loads the app and logger documents
/// through it.
///
/// # Errors
///
/// Fails if backend construction fails or either load fails.
pub async fn load_app_and_logger_config(
    mode: Option<&str>,
    app_file: &str,
    logger_file: &str,
    logger_transform: Option<&dyn TextTransform>,
) -> LoadResult<AppAndLoggerConfig> {
    let loader = ConfigLoader::new(select_backend(mode)?);
    loader
        .load_app_and_logger(app_file, logger_file, logger_transform)
        .await
}

/// Same as [`load_app_and_logger_config`], with backend settings read through
/// `lookup` instead of the process environment.
///
/// # Errors
///
/// Fails if backend construction fails or either load fails.
pub async fn load_app_and_logger_config_with<F>(
    mode: Option<&str>,
    lookup: F,
    app_file: &str,
    logger_file: &str,
    logger_transform: Option<&dyn TextTransform>,
) -> LoadResult<AppAndLoggerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let loader = ConfigLoader::new(select_backend_with(mode, lookup)?);
    loader
        .load_app_and_logger(app_file, logger_file, logger_transform)
        .await
}
