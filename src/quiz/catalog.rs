use std::io::{BufRead, BufReader, Read};

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::quiz::{Section, Verb};

const BUILTIN_VERBS: &str = include_str!("../../verbs.txt");
const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read the verb list: {0}")]
    Io(#[from] std::io::Error),

    /// Line numbers start at 1.
    #[error("line {line}: expected `v1 | v2 | v3 | meaning`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("the verb list is empty")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct VerbCatalog {
    pub verbs: Vec<Verb>,
}

impl VerbCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_reader(BUILTIN_VERBS.as_bytes())
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let mut verbs = Vec::new();
        let reader = BufReader::new(reader);

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            verbs.push(parse_line(trimmed).ok_or_else(|| CatalogError::MalformedLine {
                line: number + 1,
                content: line.clone(),
            })?);
        }

        if verbs.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { verbs })
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn sections(&self, size: usize) -> Vec<Section> {
        partition(&self.verbs, size)
    }

    /// Up to `count` distinct verbs in random order.
    pub fn random_practice<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Verb> {
        let mut verbs = self.verbs.clone();
        // Fisher-Yates
        verbs.shuffle(rng);
        verbs.truncate(count);
        verbs
    }
}

fn parse_line(line: &str) -> Option<Verb> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    match fields.as_slice() {
        [v1, v2, v3, meaning] => Some(Verb::new(v1, v2, v3, meaning)),
        _ => None,
    }
}

/// Splits `verbs` into lessons of `size` verbs, keeping their order. The last
/// lesson may be shorter.
pub fn partition(verbs: &[Verb], size: usize) -> Vec<Section> {
    verbs
        .chunks(size.max(1))
        .enumerate()
        .map(|(i, chunk)| {
            let id = i + 1;
            let name = match (chunk.first(), chunk.last()) {
                (Some(first), Some(last)) => format!("Урок {}: {} – {}", id, first.v1, last.v1),
                _ => format!("Урок {}", id),
            };
            Section {
                id,
                name,
                verbs: chunk.to_vec(),
            }
        })
        .collect()
}
