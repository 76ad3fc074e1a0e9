//! Boat registry for moorage.
//!
//! This module provides the in-memory collection of boat records, kept
//! sorted by name, together with load/save against the flat text data file
//! and the billing and payment operations.

pub mod codec;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::boat::Boat;
use crate::config::BillingConfig;
use crate::error::{Error, Result};

/// How many boats the marina holds by default.
pub const DEFAULT_CAPACITY: usize = 120;

/// The sorted, capacity-bounded collection of boat records.
///
/// The registry exclusively owns its records. The backing vector is kept
/// sorted by name (case-insensitive, ascending) after load and after every
/// insert; duplicate names are not rejected, and every lookup resolves to
/// the first match in sorted order.
#[derive(Debug)]
pub struct BoatRegistry {
    /// The records, sorted by name.
    boats: Vec<Boat>,
    /// Maximum number of records the registry will hold.
    capacity: usize,
}

impl Default for BoatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BoatRegistry {
    /// Create an empty registry with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty registry bounded at `capacity` boats.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boats: Vec::new(),
            capacity,
        }
    }

    /// Load a registry from the data file at `path`.
    ///
    /// Malformed lines are skipped, reading stops early once the capacity is
    /// reached, and the records are sorted by name afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file cannot be opened. Load is the
    /// one place where that is fatal to the program.
    pub fn load_path(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading boat data from {}", path.display());
        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::load_from(BufReader::new(file), capacity)?;
        info!("Loaded {} boats from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Load a registry from any line-oriented reader.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading itself fails; decode failures skip
    /// the offending line and keep going.
    pub fn load_from(reader: impl BufRead, capacity: usize) -> Result<Self> {
        let mut registry = Self::with_capacity(capacity);
        for line in reader.lines() {
            let line = line?;
            if registry.is_full() {
                debug!("Capacity of {} reached, ignoring remaining lines", capacity);
                break;
            }
            match codec::decode_line(&line) {
                Ok(boat) => registry.boats.push(boat),
                Err(err) => debug!("Skipping malformed line: {err}"),
            }
        }
        registry.sort();
        Ok(registry)
    }

    /// Save every record to the data file at `path`, one line per boat, in
    /// current order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file cannot be created. Callers
    /// report this rather than crash; the in-memory state stays intact.
    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("Saved {} boats to {}", self.len(), path.display());
        Ok(())
    }

    /// Write every record to `writer` in the codec's line form.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        for boat in &self.boats {
            writeln!(writer, "{}", codec::encode_line(boat))?;
        }
        Ok(())
    }

    /// Parse one raw record line and add the boat to the registry.
    ///
    /// The capacity check runs before the parse, mirroring the interactive
    /// flow where a full marina rejects the add before reading any data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the registry is full, or
    /// [`Error::Decode`] when the line does not have the 5-field shape.
    pub fn add_line(&mut self, raw: &str) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let boat = codec::decode_line(raw)?;
        self.add(boat)
    }

    /// Add a boat and re-sort the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the registry is full.
    pub fn add(&mut self, boat: Boat) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        debug!("Adding boat '{}'", boat.name);
        self.boats.push(boat);
        self.sort();
        Ok(())
    }

    /// Position of the first boat whose name matches case-insensitively.
    #[must_use]
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.boats.iter().position(|boat| boat.matches_name(name))
    }

    /// Remove the first boat matching `name`, preserving the relative order
    /// of the rest, and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no boat matches.
    pub fn remove(&mut self, name: &str) -> Result<Boat> {
        let index = self.find_index(name).ok_or_else(|| Error::not_found(name))?;
        let boat = self.boats.remove(index);
        debug!("Removed boat '{}'", boat.name);
        Ok(boat)
    }

    /// Apply a payment against the named boat's balance and return the
    /// remaining balance.
    ///
    /// A payment equal to the balance is accepted and zeroes it; a payment
    /// strictly greater is rejected without changing anything. Payment
    /// positivity is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no boat matches, or
    /// [`Error::OverpaymentRejected`] if `amount` exceeds the balance.
    pub fn make_payment(&mut self, name: &str, amount: f64) -> Result<f64> {
        let index = self.find_index(name).ok_or_else(|| Error::not_found(name))?;
        let boat = &mut self.boats[index];
        if amount > boat.amount_owed {
            return Err(Error::OverpaymentRejected {
                amount,
                owed: boat.amount_owed,
            });
        }
        boat.amount_owed -= amount;
        debug!(
            "Payment of ${:.2} against '{}', ${:.2} remaining",
            amount, boat.name, boat.amount_owed
        );
        Ok(boat.amount_owed)
    }

    /// Add one month's charge, `length * rate(kind)`, to every balance.
    pub fn accrue_monthly(&mut self, rates: &BillingConfig) {
        for boat in &mut self.boats {
            boat.amount_owed += boat.length * rates.rate_for(boat.place.kind());
        }
        debug!("Accrued monthly charges for {} boats", self.boats.len());
    }

    /// Iterate over the records in current (sorted) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Boat> {
        self.boats.iter()
    }

    /// The boat at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Boat> {
        self.boats.get(index)
    }

    /// Number of boats currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boats.len()
    }

    /// Whether the registry holds no boats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// The configured capacity bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether another add would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.boats.len() >= self.capacity
    }

    // Stable sort, so equal names keep their insertion order.
    fn sort(&mut self) {
        self.boats.sort_by_key(Boat::sort_key);
    }
}

impl<'a> IntoIterator for &'a BoatRegistry {
    type Item = &'a Boat;
    type IntoIter = std::slice::Iter<'a, Boat>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boat::{Place, PlaceKind};
    use crate::config::BillingConfig;

    const SAMPLE: &str = "\
Gone Fishin,22,land,E,0.00
Betty,24,slip,24,500.00
Vanish,36,storage,44,1200.50
Gloria,18,trailor,XR12,0.00
";

    fn sample_registry() -> BoatRegistry {
        BoatRegistry::load_from(SAMPLE.as_bytes(), DEFAULT_CAPACITY).unwrap()
    }

    fn names(registry: &BoatRegistry) -> Vec<&str> {
        registry.iter().map(|boat| boat.name.as_str()).collect()
    }

    #[test]
    fn test_load_sorts_by_name() {
        let registry = sample_registry();
        assert_eq!(
            names(&registry),
            vec!["Betty", "Gloria", "Gone Fishin", "Vanish"]
        );
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let data = "Betty,24,slip,24,500.00\nnot a record\nGloria,18,trailor,XR12,0.00\n";
        let registry = BoatRegistry::load_from(data.as_bytes(), DEFAULT_CAPACITY).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(names(&registry), vec!["Betty", "Gloria"]);
    }

    #[test]
    fn test_load_stops_at_capacity() {
        let data = "A,10,slip,1,0.00\nB,10,slip,2,0.00\nC,10,slip,3,0.00\n";
        let registry = BoatRegistry::load_from(data.as_bytes(), 2).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(names(&registry), vec!["A", "B"]);
    }

    #[test]
    fn test_load_scenario_betty() {
        let registry =
            BoatRegistry::load_from("Betty,24,slip,24,500.00\n".as_bytes(), DEFAULT_CAPACITY)
                .unwrap();
        let boat = registry.get(0).unwrap();
        assert_eq!(boat.place, Place::Slip(24));
        assert!((boat.amount_owed - 500.0).abs() < f64::EPSILON);
        let line = boat.to_string();
        assert!(line.contains("slip"));
        assert!(line.contains("# 24"));
        assert!(line.contains("$ 500.00"));
    }

    #[test]
    fn test_add_then_remove_restores_size() {
        let mut registry = sample_registry();
        let before = registry.len();
        registry.add_line("Osprey,18,trailor,QX77,0.00").unwrap();
        assert_eq!(registry.len(), before + 1);
        registry.remove("osprey").unwrap();
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_add_keeps_registry_sorted() {
        let mut registry = BoatRegistry::new();
        registry.add_line("charlie,10,slip,1,0.00").unwrap();
        registry.add_line("ALPHA,10,slip,2,0.00").unwrap();
        registry.add_line("Bravo,10,slip,3,0.00").unwrap();
        assert_eq!(names(&registry), vec!["ALPHA", "Bravo", "charlie"]);
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut registry = BoatRegistry::with_capacity(1);
        registry.add_line("One,10,slip,1,0.00").unwrap();
        let err = registry.add_line("Two,10,slip,2,0.00").unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 1 }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_malformed_line() {
        let mut registry = BoatRegistry::new();
        let err = registry.add_line("only,three,fields").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_index_case_insensitive() {
        let registry = sample_registry();
        assert_eq!(registry.find_index("BETTY"), Some(0));
        assert_eq!(registry.find_index("gloria"), Some(1));
        assert_eq!(registry.find_index("Nessie"), None);
    }

    #[test]
    fn test_remove_not_found() {
        let mut registry = sample_registry();
        let err = registry.remove("Nessie").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_remove_then_find_misses() {
        let mut registry = sample_registry();
        registry.remove("Betty").unwrap();
        assert_eq!(registry.find_index("Betty"), None);
        assert_eq!(names(&registry), vec!["Gloria", "Gone Fishin", "Vanish"]);
    }

    #[test]
    fn test_remove_duplicate_takes_first_sorted() {
        let mut registry = BoatRegistry::new();
        registry.add_line("Echo,10,slip,1,10.00").unwrap();
        registry.add_line("ECHO,12,slip,2,20.00").unwrap();
        let removed = registry.remove("echo").unwrap();
        // Stable sort keeps insertion order among equal keys
        assert_eq!(removed.name, "Echo");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().name, "ECHO");
    }

    #[test]
    fn test_payment_partial() {
        let mut registry = sample_registry();
        let remaining = registry.make_payment("Betty", 100.0).unwrap();
        assert!((remaining - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_exact_payoff_accepted() {
        let mut registry = sample_registry();
        let remaining = registry.make_payment("Betty", 500.0).unwrap();
        assert!(remaining.abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_overpayment_rejected() {
        let mut registry = sample_registry();
        let err = registry.make_payment("Betty", 500.01).unwrap_err();
        assert!(err.is_overpayment());
        let owed = registry.get(registry.find_index("Betty").unwrap()).unwrap();
        assert!((owed.amount_owed - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_unknown_boat() {
        let mut registry = sample_registry();
        assert!(registry.make_payment("Nessie", 1.0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_negative_payment_is_not_rejected() {
        // Payment positivity is deliberately unvalidated
        let mut registry = sample_registry();
        let remaining = registry.make_payment("Betty", -50.0).unwrap();
        assert!((remaining - 550.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accrue_slip_rate() {
        let mut registry =
            BoatRegistry::load_from("Betty,20,slip,24,0.00".as_bytes(), DEFAULT_CAPACITY).unwrap();
        let rates = BillingConfig::default();
        registry.accrue_monthly(&rates);
        assert!((registry.get(0).unwrap().amount_owed - 250.0).abs() < 1e-9);
        registry.accrue_monthly(&rates);
        assert!((registry.get(0).unwrap().amount_owed - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_accrue_all_kinds() {
        let data = "\
Land,10,land,A,0.00
Slip,10,slip,1,0.00
Store,10,storage,1,0.00
Trail,10,trailor,T1,0.00
";
        let mut registry = BoatRegistry::load_from(data.as_bytes(), DEFAULT_CAPACITY).unwrap();
        registry.accrue_monthly(&BillingConfig::default());
        let owed: Vec<f64> = registry.iter().map(|boat| boat.amount_owed).collect();
        // Sorted order: Land, Slip, Store, Trail
        assert!((owed[0] - 140.0).abs() < 1e-9);
        assert!((owed[1] - 125.0).abs() < 1e-9);
        assert!((owed[2] - 112.0).abs() < 1e-9);
        assert!((owed[3] - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_accrue_unknown_is_free() {
        let mut registry =
            BoatRegistry::load_from("Drifter,30,dock,7,12.00".as_bytes(), DEFAULT_CAPACITY)
                .unwrap();
        assert_eq!(registry.get(0).unwrap().place.kind(), PlaceKind::Unknown);
        registry.accrue_monthly(&BillingConfig::default());
        assert!((registry.get(0).unwrap().amount_owed - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_iter_is_restartable() {
        let registry = sample_registry();
        assert_eq!(registry.iter().count(), 4);
        assert_eq!(registry.iter().count(), 4);
        assert_eq!((&registry).into_iter().count(), 4);
    }

    #[test]
    fn test_write_to_emits_sorted_lines() {
        let registry = sample_registry();
        let mut out = Vec::new();
        registry.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Betty,24,slip,24,500.00\n\
             Gloria,18,trailor,XR12,0.00\n\
             Gone Fishin,22,land,E,0.00\n\
             Vanish,36,storage,44,1200.50\n"
        );
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = BoatRegistry::load_path("/nonexistent/boats.csv", DEFAULT_CAPACITY).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = std::env::temp_dir().join(format!("moorage_test_{}.csv", std::process::id()));

        let registry = sample_registry();
        registry.save_path(&path).unwrap();

        let reloaded = BoatRegistry::load_path(&path, DEFAULT_CAPACITY).unwrap();
        assert_eq!(reloaded.len(), registry.len());
        for (a, b) in registry.iter().zip(reloaded.iter()) {
            assert_eq!(a, b);
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_path_unwritable() {
        let registry = sample_registry();
        let err = registry.save_path("/nonexistent/dir/boats.csv").unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
        // The in-memory state is untouched
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_default_capacity() {
        let registry = BoatRegistry::default();
        assert_eq!(registry.capacity(), DEFAULT_CAPACITY);
        assert!(registry.is_empty());
        assert!(!registry.is_full());
    }

    #[test]
    fn test_capacity_120_rejection() {
        let mut registry = BoatRegistry::new();
        for i in 0..DEFAULT_CAPACITY {
            registry
                .add_line(&format!("Boat{i:03},10,slip,{},0.00", i % 85 + 1))
                .unwrap();
        }
        assert!(registry.is_full());
        let err = registry.add_line("Overflow,10,slip,1,0.00").unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 120 }));
        assert_eq!(registry.len(), DEFAULT_CAPACITY);
    }
}
