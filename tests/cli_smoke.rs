use std::path::PathBuf;

use texplot::{Axis, DATA_SUFFIX};

#[test]
fn cli_emit_writes_workdir() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let recipe_path = dir.join("recipe.json");
    let out_path = dir.join("smoke");

    let mut axis = Axis::default();
    axis.set_title("Smoke");
    axis.line(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0], "parabola");

    let recipe = serde_json::json!({ "axes": [axis] });
    let f = std::fs::File::create(&recipe_path).unwrap();
    serde_json::to_writer_pretty(f, &recipe).unwrap();

    let exe = std::env::var_os("CARGO_BIN_EXE_texplot")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "texplot.exe"
            } else {
                "texplot"
            });
            p
        });

    let recipe_arg = recipe_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe)
        .args(["emit", "--in", recipe_arg.as_str(), "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());

    let workdir = dir.join(format!("smoke{DATA_SUFFIX}"));
    assert!(workdir.join("smoke.tex").exists());
    assert!(workdir.join("0.0.data").exists());
    assert!(workdir.join("Makefile").exists());

    let tex = std::fs::read_to_string(workdir.join("smoke.tex")).unwrap();
    assert!(tex.contains("title = {\\normalsize Smoke}"));
}
