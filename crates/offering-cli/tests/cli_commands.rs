//! Integration tests for the offering CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn offering() -> Command {
    let mut cmd = Command::cargo_bin("offering").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// -- tiers --

#[test]
fn tiers_lists_catalog() {
    offering()
        .arg("tiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coward's Sacrifice"))
        .stdout(predicate::str::contains("Absolute Sacrifice"))
        .stdout(predicate::str::contains("75/20/5"));
}

#[test]
fn tiers_with_bonus_shows_adjusted_odds() {
    offering()
        .args(["tiers", "--bonus", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjusted S/P/F"))
        .stdout(predicate::str::contains("60/35/5"))
        .stdout(predicate::str::contains("+10% player bonus"));
}

#[test]
fn tiers_rejects_out_of_range_bonus() {
    for bonus in ["2147483647", "101", "-20"] {
        offering()
            .args(["tiers", &format!("--bonus={bonus}")])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("invalid value"));
    }
}

// -- bonus --

#[test]
fn bonus_breakdown() {
    offering()
        .args(["bonus", "--vip", "6", "--legendary", "--epic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total bonus: +6%"))
        .stdout(predicate::str::contains("legendary photos pledged: +2% chance"))
        .stdout(predicate::str::contains("epic photos pledged: +1% chance"))
        .stdout(predicate::str::contains("VIP bonus: +3% chance"));
}

#[test]
fn bonus_without_pledges() {
    offering()
        .args(["bonus", "--vip", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total bonus: +0%"))
        .stdout(predicate::str::contains("(no bonus)"));
}

#[test]
fn bonus_rejects_bad_vip() {
    offering()
        .args(["bonus", "--vip", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: VIP level must be a single digit"));
}

// -- play --

#[test]
fn play_full_round() {
    offering()
        .args(["play", "--seed", "42"])
        .write_stdin("submit Mira 6 Y Y\nconfirm\nselect high\napprove\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Player Mira submitted a profile."))
        .stdout(predicate::str::contains("Approver confirmed the player."))
        .stdout(predicate::str::contains("player: result | approver: result"))
        .stdout(predicate::str::contains("(resolved)"))
        .stdout(predicate::str::contains("Farewell."));
}

#[test]
fn play_reports_errors_and_continues() {
    offering()
        .args(["play", "--seed", "1", "--conditional"])
        .write_stdin("select high\nsubmit Mira 5 y N\nsubmit Mira 5 Y N\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "cannot select a tier while no session exists",
        ))
        .stdout(predicate::str::contains("with Y or N only"))
        .stdout(predicate::str::contains("awaiting approver confirmation"));
}

#[test]
fn play_help() {
    offering()
        .arg("play")
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Offering Table Commands"));
}

// -- simulate --

#[test]
fn simulate_runs_one_ritual() {
    offering()
        .args([
            "simulate",
            "--name",
            "Mira",
            "--vip",
            "7",
            "--legendary",
            "--tier",
            "full",
            "--seed",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("player submits Mira (VIP 7)"))
        .stdout(predicate::str::contains("approver confirms the player (+6%)"))
        .stdout(predicate::str::contains("Full Sacrifice"))
        .stdout(predicate::str::contains("Outcome:"));
}

#[test]
fn simulate_rejects_unknown_tier() {
    offering()
        .args([
            "simulate", "--name", "Mira", "--vip", "5", "--tier", "mythic",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sacrifice tier"));
}

#[test]
fn simulate_rejects_long_name() {
    offering()
        .args([
            "simulate",
            "--name",
            "Maximiliana",
            "--vip",
            "5",
            "--tier",
            "tiny",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 10 characters"));
}

// -- general --

#[test]
fn help_lists_subcommands() {
    offering()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tiers"))
        .stdout(predicate::str::contains("bonus"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("simulate"));
}
