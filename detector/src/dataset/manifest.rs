use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

/// One test image and the file holding its ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub image: PathBuf,
    pub annotations: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
}

impl Dataset {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not open dataset filename '{}'", path.display()))?;

        let dataset = Self::parse(&contents);
        log::debug!("Dataset '{}' lists {} images", path.display(), dataset.len());
        Ok(dataset)
    }

    /// Pairs whitespace separated tokens as (image, annotations). Line breaks
    /// carry no meaning and a trailing unpaired token is ignored.
    pub fn parse(contents: &str) -> Self {
        let tokens: Vec<&str> = contents.split_whitespace().collect();
        if tokens.len() % 2 == 1 {
            log::warn!("Ignoring unpaired trailing entry '{}' in dataset", tokens[tokens.len() - 1]);
        }

        let entries = tokens
            .chunks_exact(2)
            .map(|pair| DatasetEntry {
                image: PathBuf::from(pair[0]),
                annotations: PathBuf::from(pair[1]),
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DatasetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
