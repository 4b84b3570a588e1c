//! Control-file generation against a scratch project tree.

use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use progdock_glide::{generate_inputs, GlideError, GlideJob, Round};

const TEMPLATE: &str = "GRIDFILE placeholder.zip\nLIGANDFILE placeholder.sdf\nPRECISION SP\n";

fn project(root: &Path, round_dir: &str, ligands: &[&str]) {
    let sdf = root.join("ADRB2").join(round_dir).join("sdf");
    fs::create_dir_all(&sdf).unwrap();
    for name in ligands {
        fs::write(sdf.join(name), "").unwrap();
    }
    fs::write(root.join("glide.in"), TEMPLATE).unwrap();
}

fn job(root: &Path, round: Round) -> GlideJob {
    GlideJob {
        protein: "ADRB2".to_string(),
        file_path: root.to_path_buf(),
        grid_file: "/grids/adrb2.zip".to_string(),
        round,
        template: root.join("glide.in"),
    }
}

#[test]
fn test_iteration_round() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "iteration_1", &["train_sdf.sdf", "valid_sdf.sdf", ".hidden"]);

    let written = generate_inputs(&job(root, Round::Iteration(1))).unwrap();
    assert_eq!(written.len(), 2);

    let docked = root.join("ADRB2/iteration_1/docked");
    let ligand = root.join("ADRB2/iteration_1/sdf/train_sdf.sdf");
    assert_eq!(
        fs::read_to_string(docked.join("train_docked.in")).unwrap(),
        format!("GRIDFILE /grids/adrb2.zip\nLIGANDFILE {}\nPRECISION SP\n", ligand.display())
    );
    assert!(docked.join("valid_docked.in").exists());
}

#[test]
fn test_after_iteration_round() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "after_iteration/to_dock", &["smile_all_7.sdf"]);

    generate_inputs(&job(root, Round::AfterIteration)).unwrap();
    assert!(root
        .join("ADRB2/after_iteration/to_dock/docked/smile_all_7_docked.in")
        .exists());
}

#[test]
fn test_existing_docked_dir_is_reused() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "iteration_2", &["test_sdf.sdf"]);
    fs::create_dir_all(root.join("ADRB2/iteration_2/docked")).unwrap();

    let written = generate_inputs(&job(root, Round::Iteration(2))).unwrap();
    assert_eq!(written.len(), 1);
}

#[test]
fn test_missing_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "iteration_1", &["train_sdf.sdf"]);
    fs::remove_file(root.join("glide.in")).unwrap();

    let err = generate_inputs(&job(root, Round::Iteration(1))).unwrap_err();
    assert!(matches!(err, GlideError::Template { .. }));
}

#[test]
fn test_missing_round_dir_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "iteration_1", &["train_sdf.sdf"]);

    let err = generate_inputs(&job(root, Round::Iteration(3))).unwrap_err();
    assert!(matches!(err, GlideError::LigandDir { .. }));
    assert!(!root.join("ADRB2/iteration_3").exists());
}

#[test]
fn test_binary_accepts_legacy_flags() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    project(root, "after_iteration/to_dock", &["smile_all_1.sdf"]);

    let status = Command::new(env!("CARGO_BIN_EXE_input-glide"))
        .args(["-protein", "ADRB2"])
        .args(["-file_path", root.to_str().unwrap()])
        .args(["-gf", "/grids/adrb2.zip"])
        .args(["-n_it", "-1"])
        .args(["--g_in", root.join("glide.in").to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(root
        .join("ADRB2/after_iteration/to_dock/docked/smile_all_1_docked.in")
        .exists());
}
