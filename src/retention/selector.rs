//! Keep-count selection over tagged candidates

use crate::image::Image;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Oldest candidates beyond the keep-count, oldest first
    pub expired: Vec<Image>,
    /// The `keep` most recently pushed candidates, oldest first
    pub retained: Vec<Image>,
}

/// Sort candidates oldest first and split off everything but the newest `keep`.
///
/// The sort is stable, so images pushed at the same instant keep their input
/// order. With fewer than `keep` candidates nothing is selected.
pub fn select_expired(mut candidates: Vec<Image>, keep: usize) -> Selection {
    candidates.sort_by_key(|image| image.pushed_at);

    if candidates.len() < keep {
        return Selection {
            expired: Vec::new(),
            retained: candidates,
        };
    }

    let retained = candidates.split_off(candidates.len() - keep);
    Selection {
        expired: candidates,
        retained,
    }
}
