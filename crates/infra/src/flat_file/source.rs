//! Load/save of the whole inventory against a single flat file.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use stockroom_core::DomainError;
use stockroom_inventory::Inventory;

use super::codec::{self, HEADER};
use crate::config::MalformedLinePolicy;
use crate::error::StorageError;

/// A record line that was dropped under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: DomainError,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Backing file for an [`Inventory`].
///
/// The file is opened per call and closed before the call returns; nothing is
/// held open between a load and a save.
#[derive(Debug, Clone)]
pub struct FlatFileSource {
    path: PathBuf,
    on_malformed: MalformedLinePolicy,
}

impl FlatFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            on_malformed: MalformedLinePolicy::default(),
        }
    }

    pub fn with_malformed_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the inventory's contents with the records in the file.
    ///
    /// - Missing file: the inventory is emptied and `NotFound` is returned.
    /// - Malformed line under `Abort`: the inventory is left untouched.
    /// - Any other read failure is returned as `Io`, inventory untouched.
    pub fn load(&self, inventory: &mut Inventory) -> Result<LoadReport, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "inventory file not found, starting empty");
                inventory.clear();
                return Err(StorageError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => return Err(self.io_error(&self.path, source)),
        };

        let mut items = Vec::new();
        let mut report = LoadReport::default();

        // Line 1 is the header.
        for (index, line) in BufReader::new(file).lines().enumerate().skip(1) {
            let line = line.map_err(|source| self.io_error(&self.path, source))?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            match codec::parse_line(&line) {
                Ok(item) => items.push(item),
                Err(reason) => match self.on_malformed {
                    MalformedLinePolicy::Abort => {
                        return Err(StorageError::Malformed {
                            path: self.path.clone(),
                            line: line_no,
                            source: reason,
                        });
                    }
                    MalformedLinePolicy::Skip => {
                        tracing::warn!(line = line_no, error = %reason, "skipping malformed record");
                        report.skipped.push(SkippedLine {
                            line: line_no,
                            reason,
                        });
                    }
                },
            }
        }

        report.loaded = items.len();
        inventory.replace_all(items);

        tracing::info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "inventory loaded"
        );
        Ok(report)
    }

    /// Rewrite the whole file from the inventory.
    ///
    /// Writes a sibling temporary file, syncs it, then renames it over the
    /// target, so a crash mid-write never leaves a truncated inventory.
    pub fn save(&self, inventory: &Inventory) -> Result<(), StorageError> {
        let tmp = self.temp_path();

        if let Err(err) = self.write_snapshot(&tmp, inventory) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(&self.path, source));
        }

        tracing::info!(path = %self.path.display(), items = inventory.len(), "inventory saved");
        Ok(())
    }

    fn write_snapshot(&self, tmp: &Path, inventory: &Inventory) -> Result<(), StorageError> {
        let file = File::create(tmp).map_err(|source| self.io_error(tmp, source))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{HEADER}").map_err(|source| self.io_error(tmp, source))?;
        for item in inventory.iter() {
            writeln!(writer, "{}", codec::format_line(item))
                .map_err(|source| self.io_error(tmp, source))?;
        }

        let file = writer
            .into_inner()
            .map_err(|err| self.io_error(tmp, err.into_error()))?;
        file.sync_all().map_err(|source| self.io_error(tmp, source))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("inventory"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::{Extremum, StockItem};

    fn test_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.append(StockItem::new("South Africa", "SKU44386", "Air Max 90", 2300.0, 20).unwrap());
        inventory.append(StockItem::new("China", "SKU90000", "Jordan 1", 3200.5, 50).unwrap());
        inventory.append(StockItem::new("Vietnam", "SKU63221", "Blazer", 1700.0, 19).unwrap());
        inventory
    }

    fn write_file(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn save_then_load_round_trips_content_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("inventory.txt"));
        let original = test_inventory();

        source.save(&original).unwrap();

        let mut loaded = Inventory::new();
        let report = source.load(&mut loaded).unwrap();
        assert_eq!(report.loaded, 3);
        assert!(report.skipped.is_empty());
        assert_eq!(loaded, original);
    }

    #[test]
    fn save_writes_header_and_canonical_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        let source = FlatFileSource::new(&path);

        source.save(&test_inventory()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Country,Code,Product,Cost,Quantity\n\
             South Africa,sku44386,air max 90,2300.0,20\n\
             China,sku90000,jordan 1,3200.5,50\n\
             Vietnam,sku63221,blazer,1700.0,19\n"
        );
        assert!(!dir.path().join("inventory.txt.tmp").exists());
    }

    #[test]
    fn save_of_empty_inventory_writes_only_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");

        FlatFileSource::new(&path).save(&Inventory::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{HEADER}\n"));
    }

    #[test]
    fn load_missing_file_is_recoverable_and_leaves_inventory_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("missing.txt"));
        let mut inventory = test_inventory();

        let err = source.load(&mut inventory).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(err.is_recoverable());
        assert!(inventory.is_empty());
    }

    #[test]
    fn load_skips_header_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        write_file(
            &path,
            "Country,Code,Product,Cost,Quantity\nJapan,JP1,Kobe,10,5\n\n  \nItaly,IT2,Loafer,12.5,4\n",
        );

        let mut inventory = Inventory::new();
        let report = FlatFileSource::new(&path).load(&mut inventory).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(inventory.find_by_code("it2").unwrap().total_value(), 50.0);
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("inventory.txt"));
        source.save(&test_inventory()).unwrap();

        let mut inventory = Inventory::new();
        source.load(&mut inventory).unwrap();
        source.load(&mut inventory).unwrap();
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn malformed_line_aborts_by_default_without_touching_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        write_file(
            &path,
            "Country,Code,Product,Cost,Quantity\nJapan,JP1,Kobe,10,5\nItaly,IT2,Loafer,lots,4\n",
        );

        let mut inventory = test_inventory();
        let err = FlatFileSource::new(&path).load(&mut inventory).unwrap_err();
        assert!(!err.is_recoverable());
        match err {
            StorageError::Malformed { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source, DomainError::parse("cost", "lots"));
            }
            other => panic!("Expected Malformed error, got {other:?}"),
        }
        assert_eq!(inventory, test_inventory());
    }

    #[test]
    fn malformed_line_is_reported_under_skip_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        write_file(
            &path,
            "Country,Code,Product,Cost,Quantity\nJapan,JP1,Kobe,10,5\nbroken line\nItaly,IT2,Loafer,12.5,-4\nChina,CN3,Runner,3,1\n",
        );

        let mut inventory = Inventory::new();
        let report = FlatFileSource::new(&path)
            .with_malformed_policy(MalformedLinePolicy::Skip)
            .load(&mut inventory)
            .unwrap();

        assert_eq!(report.loaded, 2);
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![3, 4]);
        assert!(matches!(report.skipped[1].reason, DomainError::Validation(_)));
        assert_eq!(
            inventory.find_extremal(Extremum::Min).unwrap().code().as_str(),
            "cn3"
        );
    }

    #[test]
    fn save_into_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("nope").join("inventory.txt"));

        let err = source.save(&test_inventory()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        let source = FlatFileSource::new(&path);
        source.save(&test_inventory()).unwrap();

        let mut inventory = Inventory::new();
        source.load(&mut inventory).unwrap();
        let index = inventory.position_extremal(Extremum::Min).unwrap();
        inventory.restock_at(index, 6).unwrap();
        source.save(&inventory).unwrap();

        let mut reloaded = Inventory::new();
        source.load(&mut reloaded).unwrap();
        assert_eq!(reloaded.find_by_code("SKU63221").unwrap().quantity(), 25);
        assert_eq!(reloaded.len(), 3);
    }

    #[test]
    fn restock_past_i64_max_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("inventory.txt"));

        let mut inventory = test_inventory();
        inventory.restock_at(0, i64::MAX as u64).unwrap();
        assert_eq!(inventory.get(0).unwrap().quantity(), i64::MAX as u64 + 20);
        source.save(&inventory).unwrap();

        let mut loaded = Inventory::new();
        source.load(&mut loaded).unwrap();
        assert_eq!(loaded, inventory);
    }

    #[test]
    fn items_that_would_break_the_line_format_never_reach_the_file() {
        let err = StockItem::new("Korea, South", "KR1", "Runner", 10.0, 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path().join("inventory.txt"));
        let mut inventory = test_inventory();
        inventory.append(StockItem::new("South Korea", "KR1", "Runner", 10.0, 1).unwrap());
        source.save(&inventory).unwrap();

        let mut loaded = Inventory::new();
        let report = source.load(&mut loaded).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(loaded, inventory);
    }
}
