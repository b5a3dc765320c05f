use git_gate::boundary::BoundaryWarning;
use git_gate::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_missing_toc_display() {
    let warning = BoundaryWarning::MissingToc {
        file: "README.md".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("(Not fatal)"),
        "Message should say it is not fatal, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("README.md"),
        "Message should name the file, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_remote_tags_display() {
    let warning = BoundaryWarning::NoRemoteTags {
        remote: "origin".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "remote 'origin' has no version tags yet"
    );
}

#[test]
fn test_boundary_warning_unpushed_tag_display() {
    let warning = BoundaryWarning::UnpushedTag {
        tag: "v1.4.0".to_string(),
        remote: "origin".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.ends_with("git push origin v1.4.0"),
        "Message should end with the push command, got: {}",
        display_msg
    );
}

// ============================================================================
// Display Function Tests
// ============================================================================

#[test]
fn test_display_boundary_warning_all_variants() {
    // Visual verification test - output is printed to stderr
    let warnings = vec![
        BoundaryWarning::MissingToc {
            file: "README.md".to_string(),
        },
        BoundaryWarning::NoRemoteTags {
            remote: "origin".to_string(),
        },
        BoundaryWarning::UnpushedTag {
            tag: "v0.1.0".to_string(),
            remote: "origin".to_string(),
        },
    ];

    for warning in warnings {
        ui::display_boundary_warning(&warning);
    }
}

#[test]
fn test_suggestion_block_layout() {
    let block = ui::formatter::suggestion_block(&[
        "git tag -a v0.0.1 -m v0.0.1".to_string(),
        "git push --no-verify".to_string(),
    ]);
    assert_eq!(block.len(), 3);
    assert_eq!(block[0], format!("{} suggestion(s):", ui::PREFIX));
    assert_eq!(block[2], "  git push --no-verify");
}
