use std::{ops::Deref, sync::Arc};

use crate::{
    db::Database,
    error::{ErrorVerbosity, ErrorVerbosityProvider},
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, database: Database) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                database,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    database: Database,
}

impl ApiStateInner {
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
