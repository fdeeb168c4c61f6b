use kscan_core::{Barcode, BarcodeFormat};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug)]
struct HitRecord {
    count: u32,
    /// First format that translated successfully for this payload.
    format: BarcodeFormat,
}

/// Per-scan accumulation: hit counters keyed by payload, plus the payloads
/// that reached the threshold in the current frame, in confirmation order.
#[derive(Clone, Debug, Default)]
pub struct ConfirmationState {
    hits: HashMap<String, HitRecord>,
    confirmed: Vec<Barcode>,
}

impl ConfirmationState {
    /// Count one hit for `payload`. Returns `true` when this hit confirms it.
    pub(crate) fn record_hit(&mut self, payload: &str, format: BarcodeFormat, threshold: u32) -> bool {
        let record = self
            .hits
            .entry(payload.to_owned())
            .or_insert(HitRecord {
                count: 0,
                format: BarcodeFormat::Unknown,
            });
        record.count = record.count.saturating_add(1);
        if record.format == BarcodeFormat::Unknown {
            record.format = format;
        }

        if record.count < threshold || self.confirmed.iter().any(|b| b.data == payload) {
            return false;
        }
        let format = record.format;
        self.confirmed.push(Barcode::new(payload, format));
        true
    }

    /// Drop counters of payloads that are not in `seen`.
    pub(crate) fn retain_seen(&mut self, seen: &HashSet<&str>) {
        self.hits.retain(|payload, _| seen.contains(payload.as_str()));
    }

    /// Hand out the confirmed payloads and clear every counter.
    pub(crate) fn take_confirmed(&mut self) -> Vec<Barcode> {
        self.hits.clear();
        std::mem::take(&mut self.confirmed)
    }

    pub(crate) fn clear(&mut self) {
        self.hits.clear();
        self.confirmed.clear();
    }

    /// Current hit count for `payload`.
    pub fn hit_count(&self, payload: &str) -> u32 {
        self.hits.get(payload).map_or(0, |r| r.count)
    }

    /// Number of payloads with at least one hit.
    pub fn tracked(&self) -> usize {
        self.hits.len()
    }

    pub fn confirmed(&self) -> &[Barcode] {
        &self.confirmed
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.confirmed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirms_once_threshold_is_reached() {
        let mut state = ConfirmationState::default();
        assert!(!state.record_hit("A", BarcodeFormat::QrCode, 2));
        assert_eq!(state.hit_count("A"), 1);
        assert!(state.record_hit("A", BarcodeFormat::QrCode, 2));
        assert_eq!(state.confirmed(), &[Barcode::new("A", BarcodeFormat::QrCode)]);
        assert!(!state.record_hit("A", BarcodeFormat::QrCode, 2));
        assert_eq!(state.confirmed().len(), 1);
    }

    #[test]
    fn keeps_first_translated_format() {
        let mut state = ConfirmationState::default();
        state.record_hit("A", BarcodeFormat::Unknown, 3);
        state.record_hit("A", BarcodeFormat::Ean13, 3);
        state.record_hit("A", BarcodeFormat::Url, 3);
        assert_eq!(state.confirmed()[0].format, "FORMAT_EAN_13");
    }

    #[test]
    fn take_confirmed_clears_everything() {
        let mut state = ConfirmationState::default();
        state.record_hit("A", BarcodeFormat::QrCode, 1);
        state.record_hit("B", BarcodeFormat::QrCode, 5);
        let taken = state.take_confirmed();
        assert_eq!(taken.len(), 1);
        assert!(state.is_empty());
        assert_eq!(state.hit_count("B"), 0);
    }

    #[test]
    fn retain_seen_drops_absent_payloads() {
        let mut state = ConfirmationState::default();
        state.record_hit("A", BarcodeFormat::QrCode, 5);
        state.record_hit("B", BarcodeFormat::QrCode, 5);
        let seen: HashSet<&str> = ["B"].into_iter().collect();
        state.retain_seen(&seen);
        assert_eq!(state.hit_count("A"), 0);
        assert_eq!(state.hit_count("B"), 1);
        assert_eq!(state.tracked(), 1);
    }
}
