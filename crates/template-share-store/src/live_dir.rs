use std::fs;
use std::path::{Path, PathBuf};

use template_share::{Feedback, LiveBundle, LiveGroup, parse_live_group};

#[derive(Debug, thiserror::Error)]
pub enum LiveDirError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the live-template directory currently holds.
#[derive(Debug)]
pub struct LiveScan {
    pub groups: Vec<LiveGroup>,
    pub feedback: Vec<Feedback>,
}

#[derive(Debug)]
pub struct LiveImportOutcome {
    /// Where the previous definitions were copied, if there were any.
    pub backup_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

/// The directory of live-template group files the editor reads from.
///
/// Imports replace the directory's contents wholesale, but never before
/// the current files have been copied to a sibling backup directory.
pub struct LiveTemplateDir {
    dir: PathBuf,
}

impl LiveTemplateDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Enumerate the group files on disk. Files that fail to parse are
    /// reported and skipped; a missing directory is just an empty scan.
    pub fn scan(&self) -> Result<LiveScan, LiveDirError> {
        let mut groups = Vec::new();
        let mut feedback = Vec::new();

        for path in self.definition_files()? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = fs::read_to_string(&path)?;

            match parse_live_group(&file_name, &content) {
                Ok(group) => groups.push(group),
                Err(reason) => {
                    feedback.push(Feedback::warning(format!("skipping {file_name}: {reason}")));
                }
            }
        }

        Ok(LiveScan { groups, feedback })
    }

    /// Replace the directory's definitions with a decoded bundle.
    /// The existing files are copied to the sibling backup directory
    /// first, then removed, then the bundle's files are written.
    pub fn import(&self, bundle: &LiveBundle) -> Result<LiveImportOutcome, LiveDirError> {
        fs::create_dir_all(&self.dir)?;

        let existing = self.definition_files()?;
        let backup_dir = if existing.is_empty() {
            None
        } else {
            let backup = self.backup_path();
            fs::create_dir_all(&backup)?;
            for file in &existing {
                if let Some(name) = file.file_name() {
                    fs::copy(file, backup.join(name))?;
                }
            }
            Some(backup)
        };

        for file in &existing {
            fs::remove_file(file)?;
        }

        let mut written = Vec::with_capacity(bundle.groups.len());
        for group in &bundle.groups {
            // Bundle entries are flat; keep only the final path component.
            let Some(name) = Path::new(&group.file_name).file_name() else {
                continue;
            };
            let path = self.dir.join(name);
            fs::write(&path, &group.content)?;
            written.push(path);
        }

        Ok(LiveImportOutcome {
            backup_dir,
            written,
        })
    }

    fn definition_files(&self) -> Result<Vec<PathBuf>, LiveDirError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "xml")
            })
            .collect();

        files.sort();
        Ok(files)
    }

    fn backup_path(&self) -> PathBuf {
        let name = self
            .dir
            .file_name()
            .map(|n| format!("{}.backup", n.to_string_lossy()))
            .unwrap_or_else(|| "templates.backup".to_owned());

        match self.dir.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}
