//! Driving port for the printable QR sheet.

use async_trait::async_trait;

use crate::domain::{Error, QrSheet};

/// Driving port for building the operator's QR export sheet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QrSheetQuery: Send + Sync {
    async fn sheet(&self) -> Result<QrSheet, Error>;
}
