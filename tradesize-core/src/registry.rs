//! Instrument registry: ordered instrument list with a tracked selection.
//!
//! The registry never becomes empty and the selection always resolves to an
//! instrument that exists. Removal of the selected instrument moves the
//! selection to the first remaining entry in insertion order.

use tracing::{debug, warn};

use crate::domain::{Instrument, InstrumentError, InstrumentId};

#[derive(Debug, Clone)]
pub struct InstrumentRegistry {
    instruments: Vec<Instrument>,
    selected: usize,
    next_custom: u64,
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self {
            instruments: Instrument::defaults(),
            selected: 0,
            next_custom: 1,
        }
    }
}

impl InstrumentRegistry {
    /// Build a registry from a seed list, first entry selected.
    ///
    /// An empty seed, a seed with duplicate ids, or a seed with a lot size
    /// that is not a positive finite number falls back to the defaults.
    pub fn with_instruments(seed: Vec<Instrument>) -> Self {
        if seed.is_empty() {
            warn!("empty instrument list, using defaults");
            return Self::default();
        }

        let mut ids: Vec<&InstrumentId> = seed.iter().map(|i| &i.id).collect();
        ids.sort();
        ids.dedup();
        if ids.len() != seed.len() {
            warn!("duplicate instrument ids in seed, using defaults");
            return Self::default();
        }

        if let Some(bad) = seed.iter().find(|i| !i.lot_size.is_finite() || i.lot_size <= 0.0) {
            warn!(id = %bad.id, lot_size = bad.lot_size, "invalid lot size in seed, using defaults");
            return Self::default();
        }

        Self { instruments: seed, selected: 0, next_custom: 1 }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the registry holds no instruments. Never true after construction.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn get(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|i| &i.id == id)
    }

    pub fn position_of(&self, id: &InstrumentId) -> Option<usize> {
        self.instruments.iter().position(|i| &i.id == id)
    }

    pub fn selected(&self) -> &Instrument {
        &self.instruments[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select `id`. Returns true only when the selection actually changed.
    pub fn select(&mut self, id: &InstrumentId) -> bool {
        match self.position_of(id) {
            Some(idx) if idx != self.selected => {
                self.selected = idx;
                debug!(%id, "instrument selected");
                true
            }
            _ => false,
        }
    }

    /// Add a user-defined instrument with a fresh id.
    ///
    /// Invalid input leaves the registry untouched.
    pub fn add(&mut self, name: &str, lot_size_raw: &str) -> Result<InstrumentId, InstrumentError> {
        let (name, lot_size) = Instrument::parse_user_input(name, lot_size_raw)?;
        let id = self.fresh_id();
        debug!(%id, %name, lot_size, "instrument added");
        self.instruments.push(Instrument { id: id.clone(), name, lot_size });
        Ok(id)
    }

    /// Remove `id`. Refuses to remove the last instrument or an unknown id.
    ///
    /// Returns true when the removal moved the selection.
    pub fn remove(&mut self, id: &InstrumentId) -> bool {
        if self.instruments.len() <= 1 {
            debug!(%id, "refusing to remove last instrument");
            return false;
        }
        let Some(idx) = self.position_of(id) else {
            return false;
        };

        self.instruments.remove(idx);
        debug!(%id, "instrument removed");

        if idx == self.selected {
            self.selected = 0;
            true
        } else {
            if idx < self.selected {
                self.selected -= 1;
            }
            false
        }
    }

    fn fresh_id(&mut self) -> InstrumentId {
        loop {
            let candidate = InstrumentId(format!("custom-{}", self.next_custom));
            self.next_custom += 1;
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_selects_first() {
        let reg = InstrumentRegistry::default();
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.selected().id.as_str(), "eth");
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut reg = InstrumentRegistry::default();
        let a = reg.add("Gold", "0.1").unwrap();
        let b = reg.add("Silver", "5").unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.len(), 6);
        assert_eq!(reg.get(&a).unwrap().name, "Gold");
        // Adding never changes the selection.
        assert_eq!(reg.selected().id.as_str(), "eth");
    }

    #[test]
    fn add_skips_ids_already_taken() {
        let mut reg = InstrumentRegistry::with_instruments(vec![
            Instrument::new("custom-1", "Taken", 1.0),
        ]);
        let id = reg.add("New", "2").unwrap();
        assert_eq!(id.as_str(), "custom-2");
    }

    #[test]
    fn add_rejects_invalid_input() {
        let mut reg = InstrumentRegistry::default();
        assert!(reg.add("", "1").is_err());
        assert!(reg.add("X", "").is_err());
        assert!(reg.add("X", "nope").is_err());
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn remove_selected_moves_to_first() {
        let mut reg = InstrumentRegistry::default();
        assert!(reg.select(&"sol".into()));
        assert!(reg.remove(&"sol".into()));
        assert_eq!(reg.selected().id.as_str(), "eth");
    }

    #[test]
    fn remove_first_while_selected() {
        let mut reg = InstrumentRegistry::default();
        assert!(reg.remove(&"eth".into()));
        assert_eq!(reg.selected().id.as_str(), "btc");
    }

    #[test]
    fn remove_other_keeps_selection() {
        let mut reg = InstrumentRegistry::default();
        reg.select(&"nifty".into());
        assert!(!reg.remove(&"btc".into()));
        assert_eq!(reg.selected().id.as_str(), "nifty");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn remove_last_is_refused() {
        let mut reg = InstrumentRegistry::with_instruments(vec![Instrument::new("only", "Only", 1.0)]);
        assert!(!reg.remove(&"only".into()));
        assert_eq!(reg.len(), 1);
        assert!(!reg.is_empty());
        assert_eq!(reg.selected().id.as_str(), "only");
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut reg = InstrumentRegistry::default();
        assert!(!reg.remove(&"missing".into()));
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn select_unknown_or_same_reports_no_change() {
        let mut reg = InstrumentRegistry::default();
        assert!(!reg.select(&"eth".into()));
        assert!(!reg.select(&"missing".into()));
        assert_eq!(reg.selected().id.as_str(), "eth");
    }

    #[test]
    fn bad_seeds_fall_back_to_defaults() {
        let dup = vec![Instrument::new("a", "A", 1.0), Instrument::new("a", "B", 2.0)];
        assert_eq!(InstrumentRegistry::with_instruments(dup).len(), 4);

        let zero = vec![Instrument::new("a", "A", 0.0)];
        assert_eq!(InstrumentRegistry::with_instruments(zero).selected().id.as_str(), "eth");

        assert_eq!(InstrumentRegistry::with_instruments(Vec::new()).len(), 4);
    }
}
