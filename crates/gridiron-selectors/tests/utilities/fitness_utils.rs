/// Fitness vector fixtures shared by the selector tests.
pub fn ascending(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32).collect()
}

pub fn flat(len: usize, value: f32) -> Vec<f32> {
    vec![value; len]
}
