#[cfg(test)]
mod tests {
    use crate::Time;

    #[test]
    fn test_new_time_is_zeroed() {
        let time = Time::new();
        assert!(time.delta_seconds().abs() < f32::EPSILON);
        assert!(time.elapsed_seconds().abs() < f32::EPSILON);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut time = Time::new();
        time.advance(0.05);
        time.advance(0.10);

        assert!((time.delta_seconds() - 0.10).abs() < f32::EPSILON);
        assert!((time.elapsed_seconds() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut time = Time::new();
        time.advance(0.05);
        time.advance(-1.0);

        assert!(time.delta_seconds().abs() < f32::EPSILON);
        assert!((time.elapsed_seconds() - 0.05).abs() < f32::EPSILON);
    }
}
