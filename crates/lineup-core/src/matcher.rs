//! Nearest-descriptor matching against a labeled gallery.

use crate::gallery::Gallery;
use crate::types::{Descriptor, MatchResult};

/// Default maximum descriptor distance for two faces to count as the same
/// identity. This is the recognition model's conventional cutoff in
/// normalized descriptor space.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.6;

/// Matches probe descriptors against an immutable gallery.
///
/// The best match for a probe is the single closest individual descriptor
/// across the whole gallery, not a per-identity average — one good sample
/// in a multi-sample set is enough to win.
pub struct FaceMatcher {
    gallery: Gallery,
    threshold: f32,
}

impl FaceMatcher {
    pub fn new(gallery: Gallery) -> Self {
        Self::with_threshold(gallery, DEFAULT_MATCH_THRESHOLD)
    }

    pub fn with_threshold(gallery: Gallery, threshold: f32) -> Self {
        Self { gallery, threshold }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Find the closest gallery descriptor to `probe`.
    ///
    /// Returns the owning label when the minimum distance is within the
    /// threshold, otherwise the unknown sentinel; the distance is reported
    /// in both cases. Equidistant candidates resolve to the first one in
    /// gallery iteration order (strict `<` comparison, so a later entry
    /// must beat the incumbent outright).
    pub fn find_best_match(&self, probe: &Descriptor) -> MatchResult {
        let mut best_distance = f32::INFINITY;
        let mut best_label: Option<&str> = None;

        for set in self.gallery.sets() {
            for descriptor in set.descriptors() {
                let distance = probe.euclidean_distance(descriptor);
                if distance < best_distance {
                    best_distance = distance;
                    best_label = Some(set.label());
                }
            }
        }

        tracing::trace!(
            nearest = ?best_label,
            distance = best_distance,
            threshold = self.threshold,
            "probe matched"
        );

        if best_distance <= self.threshold {
            MatchResult {
                label: best_label.map(str::to_owned),
                distance: best_distance,
            }
        } else {
            MatchResult {
                label: None,
                distance: best_distance,
            }
        }
    }

    /// Match every probe, preserving order: `result[i]` corresponds to
    /// `probes[i]`.
    pub fn match_all(&self, probes: &[Descriptor]) -> Vec<MatchResult> {
        probes.iter().map(|p| self.find_best_match(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::LabeledDescriptors;

    fn gallery(sets: &[(&str, Vec<Vec<f32>>)]) -> Gallery {
        let sets = sets
            .iter()
            .map(|(label, samples)| {
                let descriptors = samples.iter().cloned().map(Descriptor::new).collect();
                LabeledDescriptors::new(*label, descriptors).unwrap()
            })
            .collect();
        Gallery::new(sets).unwrap()
    }

    #[test]
    fn test_exact_probe_matches_with_distance_zero() {
        let g = gallery(&[
            ("Thor", vec![vec![1.0, 0.0, 0.0]]),
            ("Hawkeye", vec![vec![0.0, 1.0, 0.0]]),
        ]);
        let matcher = FaceMatcher::new(g);

        let result = matcher.find_best_match(&Descriptor::new(vec![0.0, 1.0, 0.0]));
        assert_eq!(result.label.as_deref(), Some("Hawkeye"));
        assert_eq!(result.distance, 0.0);
        // Distance zero is always within the threshold
        assert!(result.is_match());
    }

    #[test]
    fn test_all_descriptors_beyond_threshold_is_unknown() {
        let g = gallery(&[("Thor", vec![vec![1.0, 0.0]])]);
        let matcher = FaceMatcher::new(g);

        // Distance to the only entry is 2.0, well past 0.6
        let result = matcher.find_best_match(&Descriptor::new(vec![-1.0, 0.0]));
        assert!(!result.is_match());
        assert_eq!(result.display_label(), "unknown");
        assert!((result.distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_outlier_sample_wins_over_closer_average() {
        // Brute-force over individual descriptors: Thor's second sample is
        // nearest even though Hawkeye's samples have the better average.
        let g = gallery(&[
            ("Hawkeye", vec![vec![0.3, 0.0], vec![0.5, 0.0]]),
            ("Thor", vec![vec![5.0, 0.0], vec![0.45, 0.0]]),
        ]);
        let matcher = FaceMatcher::new(g);

        let result = matcher.find_best_match(&Descriptor::new(vec![0.44, 0.0]));
        assert_eq!(result.label.as_deref(), Some("Thor"));
    }

    #[test]
    fn test_equidistant_tie_goes_to_first_in_gallery_order() {
        let g = gallery(&[
            ("Thor", vec![vec![1.0, 0.0]]),
            ("Hawkeye", vec![vec![-1.0, 0.0]]),
        ]);
        let matcher = FaceMatcher::with_threshold(g, 2.0);

        // Probe equidistant from both entries
        let result = matcher.find_best_match(&Descriptor::new(vec![0.0, 0.0]));
        assert_eq!(result.label.as_deref(), Some("Thor"));
    }

    #[test]
    fn test_matching_is_deterministic() {
        let g = gallery(&[
            ("Thor", vec![vec![0.2, 0.8], vec![0.3, 0.7]]),
            ("Hawkeye", vec![vec![0.9, 0.1]]),
        ]);
        let matcher = FaceMatcher::new(g);
        let probe = Descriptor::new(vec![0.25, 0.75]);

        let first = matcher.find_best_match(&probe);
        for _ in 0..10 {
            assert_eq!(matcher.find_best_match(&probe), first);
        }
    }

    #[test]
    fn test_match_all_preserves_order_and_count() {
        let g = gallery(&[
            ("Thor", vec![vec![1.0, 0.0]]),
            ("Hawkeye", vec![vec![0.0, 1.0]]),
        ]);
        let matcher = FaceMatcher::new(g);

        let probes = vec![
            Descriptor::new(vec![0.0, 1.0]),
            Descriptor::new(vec![1.0, 0.0]),
            Descriptor::new(vec![-5.0, -5.0]),
        ];
        let results = matcher.match_all(&probes);

        assert_eq!(results.len(), probes.len());
        assert_eq!(results[0].label.as_deref(), Some("Hawkeye"));
        assert_eq!(results[1].label.as_deref(), Some("Thor"));
        assert!(!results[2].is_match());
    }

    #[test]
    fn test_custom_threshold_is_honored() {
        let g = gallery(&[("Thor", vec![vec![1.0, 0.0]])]);
        let probe = Descriptor::new(vec![0.5, 0.0]);

        let strict = FaceMatcher::with_threshold(gallery(&[("Thor", vec![vec![1.0, 0.0]])]), 0.1);
        assert!(!strict.find_best_match(&probe).is_match());

        let lax = FaceMatcher::with_threshold(g, 0.5);
        assert!(lax.find_best_match(&probe).is_match());
    }
}
