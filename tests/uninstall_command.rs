//! Integration tests for the uninstall path.
#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::TestRepo;
use skills_cli::units::UnitKind;

#[test]
fn round_trip_leaves_no_owned_symlinks() {
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    repo.add_skill("beta");
    repo.add_command("x.md");
    let settings = repo.settings();

    common::install_all(&settings);
    let log = common::uninstall_all(&settings);
    assert_eq!(log.failure_count(), 0);

    assert!(common::symlinks_under(&settings.skills_dest).is_empty());
    assert!(common::symlinks_under(&settings.commands_dest).is_empty());
}

#[test]
fn unit_deleted_from_source_leaves_an_orphan() {
    // A unit removed from the source after install is no longer discovered,
    // so uninstall does not touch its symlink. This is intended behaviour:
    // the symlinks are the only record of what was installed.
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    repo.add_skill("doomed");
    let settings = repo.settings();

    common::link(&settings, UnitKind::Skill);
    repo.remove_skill("doomed");
    let stats = common::unlink(&settings, UnitKind::Skill);

    assert_eq!(stats.removed, 1); // alpha only
    let leftovers = common::symlinks_under(&settings.skills_dest);
    assert_eq!(leftovers.len(), 1);
    assert_eq!(
        leftovers[0].file_name().and_then(|n| n.to_str()),
        Some("doomed")
    );
}

#[test]
fn repointed_symlink_is_left_alone() {
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    let settings = repo.settings();

    common::link(&settings, UnitKind::Skill);

    // The user repointed the link at something else; it is theirs now.
    let target = settings.skills_dest.join("alpha");
    let elsewhere = repo.dest.path().join("elsewhere");
    std::fs::create_dir_all(&elsewhere).unwrap();
    std::fs::remove_file(&target).unwrap();
    std::os::unix::fs::symlink(&elsewhere, &target).unwrap();

    let stats = common::unlink(&settings, UnitKind::Skill);
    assert_eq!(stats.removed, 0);
    assert_eq!(std::fs::read_link(&target).unwrap(), elsewhere);
}

#[test]
fn foreign_entries_survive_uninstall() {
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    let settings = repo.settings();

    let foreign = settings.skills_dest.join("alpha");
    std::fs::create_dir_all(&foreign).unwrap();
    std::fs::write(foreign.join("precious.txt"), b"mine").unwrap();

    let stats = common::unlink(&settings, UnitKind::Skill);
    assert_eq!(stats.removed, 0);
    assert_eq!(std::fs::read(foreign.join("precious.txt")).unwrap(), b"mine");
}

#[test]
fn uninstall_with_nothing_installed_is_a_noop() {
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    let settings = repo.settings();

    // Destination roots were never created; tasks are not applicable.
    let log = common::uninstall_all(&settings);
    assert_eq!(log.failure_count(), 0);
    assert!(!settings.skills_dest.exists());
}

#[test]
fn uninstall_then_reinstall_restores_links() {
    let repo = TestRepo::new();
    repo.add_skill("alpha");
    let settings = repo.settings();

    common::link(&settings, UnitKind::Skill);
    common::unlink(&settings, UnitKind::Skill);
    let stats = common::link(&settings, UnitKind::Skill);

    assert_eq!(stats.created, 1);
    assert_eq!(
        std::fs::read_link(settings.skills_dest.join("alpha")).unwrap(),
        settings.source_root.join("alpha")
    );
}
