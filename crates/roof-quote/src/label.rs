//! Display labels for roof sections, in detection order.

/// Label for the roof section at `index`.
///
/// 0 → "Main Roof", 1 → "Second Roof", 2 → "Third Roof", then
/// "{index + 1}th Roof". The "th" suffix is applied to every numeral from 4
/// up, including 21, 22, 23 (see DESIGN.md).
pub fn generate_label(index: usize) -> String {
    match index {
        0 => "Main Roof".to_string(),
        1 => "Second Roof".to_string(),
        2 => "Third Roof".to_string(),
        n => format!("{}th Roof", n + 1),
    }
}
