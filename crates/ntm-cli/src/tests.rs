use clap::error::ErrorKind;
use clap::Parser;
use ntm_installer::DownloadProgress;

use super::render::{
    render_status_line, resolve_output_style, DownloadBar, OutputStyle, Status,
};
use super::{Cli, Commands};

#[test]
fn parses_a_bare_upgrade() {
    let cli = Cli::try_parse_from(["ntm", "upgrade"]).expect("must parse");
    let Commands::Upgrade(args) = cli.command else {
        panic!("expected upgrade command");
    };
    assert!(!args.check);
    assert!(!args.yes);
    assert!(!args.force);
    assert!(!args.strict);
    assert!(!args.verbose);
    assert!(!args.json);
}

#[test]
fn parses_the_full_upgrade_flag_set() {
    let cli = Cli::try_parse_from([
        "ntm", "upgrade", "--check", "--yes", "--force", "--strict", "--verbose", "--json",
    ])
    .expect("must parse");
    let Commands::Upgrade(args) = cli.command else {
        panic!("expected upgrade command");
    };
    assert!(args.check);
    assert!(args.yes);
    assert!(args.force);
    assert!(args.strict);
    assert!(args.verbose);
    assert!(args.json);
}

#[test]
fn accepts_the_short_flags() {
    let cli = Cli::try_parse_from(["ntm", "upgrade", "-y", "-f", "-v"]).expect("must parse");
    let Commands::Upgrade(args) = cli.command else {
        panic!("expected upgrade command");
    };
    assert!(args.yes);
    assert!(args.force);
    assert!(args.verbose);
}

#[test]
fn parses_version_and_its_short_flag() {
    let cli = Cli::try_parse_from(["ntm", "version"]).expect("must parse");
    assert!(matches!(cli.command, Commands::Version { short: false }));

    let cli = Cli::try_parse_from(["ntm", "version", "--short"]).expect("must parse");
    assert!(matches!(cli.command, Commands::Version { short: true }));
}

#[test]
fn rejects_unknown_flags() {
    let err = Cli::try_parse_from(["ntm", "upgrade", "--sideload"]).expect_err("must reject");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn requires_a_subcommand() {
    let err = Cli::try_parse_from(["ntm"]).expect_err("must reject");
    assert_eq!(
        err.kind(),
        ErrorKind::MissingSubcommand,
        "unexpected error: {err}"
    );
}

#[test]
fn rich_output_needs_both_streams_on_a_terminal() {
    assert_eq!(resolve_output_style(true, true), OutputStyle::Rich);
    assert_eq!(resolve_output_style(true, false), OutputStyle::Plain);
    assert_eq!(resolve_output_style(false, true), OutputStyle::Plain);
    assert_eq!(resolve_output_style(false, false), OutputStyle::Plain);
}

#[test]
fn plain_status_lines_carry_the_badge_without_escape_codes() {
    let line = render_status_line(OutputStyle::Plain, Status::Warn, "checksum not verified");
    assert_eq!(line, "[WARN] checksum not verified");

    let line = render_status_line(OutputStyle::Plain, Status::Ok, "upgraded to v1.5.0");
    assert_eq!(line, "[OK] upgraded to v1.5.0");
}

#[test]
fn rich_status_lines_keep_the_badge_and_message() {
    let line = render_status_line(OutputStyle::Rich, Status::Err, "rolled back");
    assert!(line.contains("[ERR]"));
    assert!(line.ends_with(" rolled back"));
}

#[test]
fn status_badges_are_stable() {
    assert_eq!(Status::Ok.badge(), "[OK]");
    assert_eq!(Status::Warn.badge(), "[WARN]");
    assert_eq!(Status::Err.badge(), "[ERR]");
}

#[test]
fn plain_download_bar_is_inert() {
    let mut bar = DownloadBar::new(OutputStyle::Plain);
    bar.start(Some(1024));
    bar.advance(512);
    bar.advance(512);
    bar.finish();
}
