use crate::clustering::anchor_sort::Anchor;

/// Formats the accuracy line and the sorted anchor table printed by the CLI.
///
/// Each row is an anchor with the number of boxes assigned to it. Sizes use
/// three decimals and ratios one, so normalized and pixel anchors both stay
/// readable.
pub fn anchor_table(rows: &[(Anchor, usize)], average_iou: f64) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format!("Accuracy: {:.2}%", average_iou * 100.0));
    lines.push("Recommended anchors (sorted by area)".to_string());
    lines.push(format!(
        "{:>10} {:>10} {:>14} {:>8}",
        "Width", "Height", "Height/Width", "Boxes"
    ));
    for (a, members) in rows {
        lines.push(format!(
            "{:>10.3} {:>10.3} {:>14.1} {:>8}",
            a.width, a.height, a.aspect_ratio, members
        ));
    }
    lines.join("\n")
}

/// Anchors as a single `w,h, w,h, ...` line, the layout YOLO configs expect.
pub fn anchor_line(anchors: &[Anchor]) -> String {
    anchors
        .iter()
        .map(|a| format!("{:.3},{:.3}", a.width, a.height))
        .collect::<Vec<_>>()
        .join(", ")
}
