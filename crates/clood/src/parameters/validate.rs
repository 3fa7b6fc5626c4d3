use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{
    BoundsOptions, DateDecayOptions, LocationDecayOptions, NumberDecayOptions, OntologyOptions,
    VectorOptions,
};

use super::EditorError;

static DATE_SCALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(ms|s|m|h|d)$").unwrap());

static DISTANCE_SCALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(mm|cm|m|km|in|ft|yd|mi|nmi)$").unwrap());

pub(super) fn bounds(options: &BoundsOptions) -> Result<(), EditorError> {
    if !(options.min < options.max) {
        return Err(EditorError::InvalidBounds {
            min: options.min,
            max: options.max,
        });
    }
    match options.jump {
        Some(jump) if !unit_interval(jump) => Err(EditorError::InvalidJump(jump)),
        _ => Ok(()),
    }
}

pub(super) fn number_decay(options: &NumberDecayOptions) -> Result<(), EditorError> {
    decay(options.decay)?;
    if !(options.scale > 0.0) || !options.scale.is_finite() {
        return Err(EditorError::InvalidScale(options.scale.to_string()));
    }
    Ok(())
}

pub(super) fn date_decay(options: &DateDecayOptions) -> Result<(), EditorError> {
    decay(options.decay)?;
    scale(&DATE_SCALE, &options.scale)
}

pub(super) fn location_decay(options: &LocationDecayOptions) -> Result<(), EditorError> {
    decay(options.decay)?;
    scale(&DISTANCE_SCALE, &options.scale)
}

pub(super) fn ontology(options: &OntologyOptions) -> Result<(), EditorError> {
    if options.name.trim().is_empty() {
        return Err(EditorError::EmptyOntologyName);
    }
    if options.sources.is_empty() {
        return Err(EditorError::MissingSources);
    }
    Ok(())
}

pub(super) fn vector(options: &VectorOptions) -> Result<(), EditorError> {
    if options.dimension == 0 {
        return Err(EditorError::InvalidDimension);
    }
    Ok(())
}

fn decay(value: f64) -> Result<(), EditorError> {
    if unit_interval(value) {
        Ok(())
    } else {
        Err(EditorError::InvalidDecay(value))
    }
}

fn unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn scale(pattern: &Regex, text: &str) -> Result<(), EditorError> {
    let positive = pattern
        .captures(text.trim())
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .is_some_and(|n| n > 0.0);
    if positive {
        Ok(())
    } else {
        Err(EditorError::InvalidScale(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(bounds(&BoundsOptions::default()).is_ok());
        let flat = BoundsOptions {
            min: 5.0,
            max: 5.0,
            jump: None,
        };
        assert!(matches!(bounds(&flat), Err(EditorError::InvalidBounds { .. })));

        let bad_jump = BoundsOptions {
            jump: Some(0.0),
            ..BoundsOptions::default()
        };
        assert_eq!(bounds(&bad_jump), Err(EditorError::InvalidJump(0.0)));
    }

    #[test]
    fn test_date_scale() {
        for ok in ["365d", "12h", "1.5m", "500ms", "30s"] {
            let opts = DateDecayOptions {
                scale: ok.to_string(),
                decay: 0.5,
            };
            assert!(date_decay(&opts).is_ok(), "{}", ok);
        }
        for bad in ["", "d", "0d", "10 years", "-1d", "10km"] {
            let opts = DateDecayOptions {
                scale: bad.to_string(),
                decay: 0.5,
            };
            assert!(date_decay(&opts).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_location_scale() {
        let mut opts = LocationDecayOptions::default();
        assert!(location_decay(&opts).is_ok());
        opts.scale = "3nmi".to_string();
        assert!(location_decay(&opts).is_ok());
        opts.scale = "3 parsecs".to_string();
        assert!(location_decay(&opts).is_err());
    }

    #[test]
    fn test_decay_range() {
        let mut opts = NumberDecayOptions::default();
        opts.decay = 1.0;
        assert!(number_decay(&opts).is_ok());
        opts.decay = 0.0;
        assert_eq!(number_decay(&opts), Err(EditorError::InvalidDecay(0.0)));
        opts.decay = 0.5;
        opts.scale = -2.0;
        assert!(matches!(number_decay(&opts), Err(EditorError::InvalidScale(_))));
    }
}
