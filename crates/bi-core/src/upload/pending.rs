use serde::{Deserialize, Serialize};

/// Locally picked images waiting to be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpload {
    images: Vec<String>,
    description: String,
}

/// What happened when a batch of picked images was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddImagesOutcome {
    pub added: usize,
    /// Images beyond the per-pick limit that were ignored.
    pub skipped: usize,
    pub total: usize,
}

impl AddImagesOutcome {
    pub fn message(&self) -> String {
        let plural = if self.added == 1 { "" } else { "s" };
        format!(
            "{} image{} added successfully. Total: {}",
            self.added, plural, self.total
        )
    }
}

impl PendingUpload {
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Append one picker batch, keeping at most `selection_limit` of it.
    pub fn add_batch(&mut self, batch: Vec<String>, selection_limit: usize) -> AddImagesOutcome {
        let offered = batch.len();
        self.images.extend(batch.into_iter().take(selection_limit));
        let added = offered.min(selection_limit);
        AddImagesOutcome {
            added,
            skipped: offered - added,
            total: self.images.len(),
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Reset after a successful submit of `uploaded`.
    ///
    /// Only the images that were sent are removed; anything picked while the
    /// request was in flight stays pending.
    pub fn complete(&mut self, uploaded: &[String]) {
        let mut sent = uploaded.to_vec();
        self.images.retain(|image| match sent.iter().position(|s| s == image) {
            Some(index) => {
                sent.swap_remove(index);
                false
            }
            None => true,
        });
        self.description.clear();
    }
}

/// Submit button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitButton {
    Disabled,
    Enabled,
}

impl SubmitButton {
    pub fn for_state(pending: &PendingUpload, in_flight: bool) -> Self {
        if pending.is_empty() || in_flight {
            SubmitButton::Disabled
        } else {
            SubmitButton::Enabled
        }
    }
}
