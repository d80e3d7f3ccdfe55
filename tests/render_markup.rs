use texplot::{Axis, LegendPosition, Marker, render_document};

fn simple_axis() -> Axis {
    let mut axis = Axis::default();
    axis.set_title("Residuals");
    axis.set_x_label("Time (\\si{\\second})");
    axis.set_y_label("Error");
    axis.line(vec![0.0, 1.0, 2.0], vec![0.5, 0.25, 0.125], "fit");
    axis
}

#[test]
fn document_wraps_axes_in_a_groupplot() {
    let mut a = simple_axis();
    a.legend(LegendPosition::NorthEast);
    let mut b = Axis::default();
    b.scatter(vec![1.0, 2.0], vec![3.0, 4.0], Marker::Cross, "samples");

    let doc = render_document(&[a, b], None).unwrap();

    assert!(doc.tex.starts_with("\\IfFileExists{standalone.cls}"));
    assert!(doc.tex.contains("\\documentclass{standalone}"));
    assert!(doc.tex.contains("group style = {columns = 1, rows = 2, vertical sep = 1.3cm}"));
    assert_eq!(doc.tex.matches("\\nextgroupplot[").count(), 2);
    assert!(doc.tex.contains("\\begin{document}"));
    assert!(doc.tex.ends_with("\\end{document}\n"));
}

#[test]
fn series_become_tables_on_disk() {
    let doc = render_document(&[simple_axis()], None).unwrap();

    assert_eq!(doc.tables.len(), 1);
    let table = &doc.tables[0];
    assert!(doc.tex.contains(&format!("table {{{}}}", table.file_name)));
    let lines: Vec<&str> = table.contents.lines().collect();
    assert_eq!(lines, ["x y", "0 0.5", "1 0.25", "2 0.125"]);
}

#[test]
fn titles_and_labels_are_emitted_verbatim() {
    let doc = render_document(&[simple_axis()], None).unwrap();

    assert!(doc.tex.contains("title = {\\normalsize Residuals}"));
    assert!(doc.tex.contains("xlabel = {Time (\\si{\\second})}"));
    assert!(doc.tex.contains("ylabel = {Error}"));
}

#[test]
fn legend_names_follow_draw_order() {
    let mut axis = simple_axis();
    axis.scatter(vec![0.0], vec![0.0], Marker::Dot, "raw");
    axis.legend(LegendPosition::SouthWest);

    let doc = render_document(&[axis], None).unwrap();

    assert!(doc.tex.contains("\\legend{fit, raw, }"));
    assert!(doc.tex.contains("at = {(0, 0)}, anchor = south west"));
}

#[test]
fn mismatched_series_lengths_are_rejected() {
    let mut axis = Axis::default();
    axis.line(vec![0.0, 1.0], vec![0.0], "bad");

    let err = render_document(&[axis], None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("lengths must match"), "unexpected error: {msg}");
}

#[test]
fn empty_document_is_an_error() {
    assert!(render_document(&[], None).is_err());
}
