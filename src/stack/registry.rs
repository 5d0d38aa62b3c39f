use super::crosscutting::CrossCuttingEnricher;
use super::detector::EcosystemDetector;
use super::language::*;
use super::{AppProfile, DetectContext};
use crate::error::{DetectionError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, trace};

/// Ordered set of ecosystem detectors plus the cross-cutting enricher.
///
/// Every detector runs on every pass; priority only fixes the order in which
/// they run and breaks confidence ties.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn EcosystemDetector>>,
    enricher: Box<dyn EcosystemDetector>,
}

impl DetectorRegistry {
    /// Registry with no ecosystem detectors.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            enricher: Box::new(CrossCuttingEnricher),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NodeDetector));
        registry.register(Box::new(PythonDetector));
        registry.register(Box::new(GoDetector));
        registry.register(Box::new(RustDetector));
        registry.register(Box::new(RubyDetector));
        registry.register(Box::new(ElixirDetector));
        registry.register(Box::new(PhpDetector));
        registry.register(Box::new(JavaDetector));
        registry
    }

    /// Adds a detector, keeping ascending priority with ties in registration
    /// order.
    pub fn register(&mut self, detector: Box<dyn EcosystemDetector>) {
        self.detectors.push(detector);
        self.detectors.sort_by_key(|d| d.priority());
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Every matching candidate, highest confidence first.
    ///
    /// Candidates are not enriched. An empty result means no stack was
    /// detected.
    pub fn detect_all(&self, ctx: &DetectContext, fs: &dyn FileSystem) -> Result<Vec<AppProfile>> {
        debug!(
            root = %fs.root().display(),
            detectors = self.detectors.len(),
            "Starting detection"
        );
        let mut candidates = Vec::new();

        for detector in &self.detectors {
            ctx.check()?;
            trace!(detector = detector.name(), "Running detector");
            if let Some(profile) = detector.detect(fs)? {
                debug!(
                    detector = detector.name(),
                    confidence = profile.confidence,
                    "Detector matched"
                );
                profile.validate()?;
                candidates.push(profile);
            }
        }

        // Stable: equal confidence keeps priority order.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        Ok(candidates)
    }

    /// Highest-confidence candidate with cross-cutting metadata merged in.
    pub fn detect_best(&self, ctx: &DetectContext, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        let mut candidates = self.detect_all(ctx, fs)?.into_iter();
        let Some(mut best) = candidates.next() else {
            debug!("No detector matched");
            return Ok(None);
        };

        ctx.check()?;
        let enrichment = self.enricher.detect(fs)?;
        best.merge(enrichment.as_ref());
        best.validate()?;

        debug!(
            language = ?best.language,
            framework = ?best.framework,
            confidence = best.confidence,
            "Selected profile"
        );
        Ok(Some(best))
    }

    /// Runs [`detect_best`](Self::detect_best) against a directory on disk.
    pub fn detect_from_path(&self, ctx: &DetectContext, path: &Path) -> Result<Option<AppProfile>> {
        self.detect_best(ctx, &open_dir(path)?)
    }

    /// Runs [`detect_all`](Self::detect_all) against a directory on disk.
    pub fn detect_all_from_path(&self, ctx: &DetectContext, path: &Path) -> Result<Vec<AppProfile>> {
        self.detect_all(ctx, &open_dir(path)?)
    }
}

fn open_dir(path: &Path) -> Result<RealFileSystem> {
    if !path.exists() {
        return Err(DetectionError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(DetectionError::NotADirectory(path.to_path_buf()));
    }
    Ok(RealFileSystem::new(path))
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
