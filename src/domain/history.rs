use super::transcription::Transcription;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Puts `entry` at the front, drops any older entry with the same id and
/// evicts from the tail past `capacity`.
pub fn insert_capped(entries: &mut Vec<Transcription>, entry: Transcription, capacity: usize) {
    entries.retain(|existing| existing.id != entry.id);
    entries.insert(0, entry);
    entries.truncate(capacity.max(1));
}
