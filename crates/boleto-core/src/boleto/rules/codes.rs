//! Installation and user code extraction.

use super::FieldExtractor;
use super::patterns::{INSTALLATION_CODE, USER_CODE};

/// Installation code extractor (standalone 12-digit run).
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallationCodeExtractor;

impl InstallationCodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for InstallationCodeExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INSTALLATION_CODE
            .captures_iter(text)
            .map(|caps| caps[1].replace('/', ""))
            .collect()
    }
}

/// User code extractor (standalone run of 8 to 11 digits).
#[derive(Debug, Clone, Copy, Default)]
pub struct UserCodeExtractor;

impl UserCodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for UserCodeExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        USER_CODE
            .captures_iter(text)
            .map(|caps| caps[1].replace(' ', ""))
            .collect()
    }
}
