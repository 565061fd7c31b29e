//! Follow-cursor pupils.

/// Largest pupil displacement in pixels
pub const MAX_PUPIL_OFFSET: f64 = 3.0;

/// Pupil translation for a pointer position.
///
/// The offset is the pointer's distance from the spider's centre as a
/// fraction of the viewport, scaled to [`MAX_PUPIL_OFFSET`].
pub fn pupil_offset(pointer: (f64, f64), center: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let (width, height) = viewport;
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }

    let dx = (pointer.0 - center.0) / width;
    let dy = (pointer.1 - center.1) / height;
    (dx * MAX_PUPIL_OFFSET, dy * MAX_PUPIL_OFFSET)
}

/// CSS transform for [`pupil_offset`]
pub fn pupil_transform(offset: (f64, f64)) -> String {
    format!("translate({}px, {}px)", offset.0, offset.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pupil_offset() {
        let offset = pupil_offset((1000.0, 500.0), (500.0, 500.0), (1000.0, 800.0));
        assert_eq!(offset, (1.5, 0.0));

        assert_eq!(pupil_offset((1.0, 1.0), (0.0, 0.0), (0.0, 600.0)), (0.0, 0.0));
        assert_eq!(pupil_transform((1.5, 0.0)), "translate(1.5px, 0px)");
    }
}
