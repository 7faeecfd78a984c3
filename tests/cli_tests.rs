//! End-to-end tests driving the `snplog` binary against small on-disk
//! fixtures.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn snplog() -> Command {
    Command::cargo_bin("snplog").expect("binary builds")
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture written");
    path
}

/// A single 1 kb scaffold, five columns as samtools faidx emits them.
const FAI: &str = "scaf_1\t1000\t9\t70\t71\n";

#[test]
fn test_merge_translates_and_composes() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    // 3 bp insertion ending at 0-based position 49: branch 2 coordinates past
    // it sit 3 to the right of branch 1's
    let indels = write_fixture(dir.path(), "branch1.indels", "scaf_1\t49\tins\t3\n");
    let branch1 = write_fixture(dir.path(), "branch1.snps", "scaf_1\t100\tA\tG\n");
    let branch2 = write_fixture(
        dir.path(),
        "branch2.snps",
        "scaf_1\t10\tT\tC\nscaf_1\t51\tC\tC\nscaf_1\t103\tG\tT\n",
    );

    snplog()
        .arg("merge")
        .args(["--fai", fai.to_str().unwrap()])
        .args(["-i", indels.to_str().unwrap()])
        .args(["-b", branch1.to_str().unwrap()])
        .args(["-c", branch2.to_str().unwrap()])
        .assert()
        .success()
        // 10 maps to itself; 51 falls inside the inserted run and is dropped;
        // 103 maps to 100 where it composes with branch 1's A->G into A->T
        .stdout("scaf_1\t10\tT\tC\nscaf_1\t100\tA\tT\n");
}

#[test]
fn test_merge_preserves_branch1_exclusive_sites() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let indels = write_fixture(dir.path(), "branch1.indels", "");
    let branch1 = write_fixture(
        dir.path(),
        "branch1.snps",
        "scaf_1\t50\tC\tA\nscaf_1\t200\tG\tT\n",
    );
    let branch2 = write_fixture(dir.path(), "branch2.snps", "scaf_1\t100\tA\tG\n");

    snplog()
        .arg("merge")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-i", indels.to_str().unwrap()])
        .args(["-b", branch1.to_str().unwrap()])
        .args(["-c", branch2.to_str().unwrap()])
        .assert()
        .success()
        .stdout("scaf_1\t50\tC\tA\nscaf_1\t100\tA\tG\nscaf_1\t200\tG\tT\n");
}

#[test]
fn test_merge_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let indels = write_fixture(dir.path(), "branch1.indels", "");
    let branch1 = write_fixture(dir.path(), "branch1.snps", "");

    snplog()
        .arg("merge")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-i", indels.to_str().unwrap()])
        .args(["-b", branch1.to_str().unwrap()])
        .args(["-c", dir.path().join("no-such-file.snps").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_merge_malformed_record_fails() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let indels = write_fixture(dir.path(), "branch1.indels", "");
    let branch1 = write_fixture(dir.path(), "branch1.snps", "scaf_1\tnot-a-number\tA\tG\n");
    let branch2 = write_fixture(dir.path(), "branch2.snps", "");

    snplog()
        .arg("merge")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-i", indels.to_str().unwrap()])
        .args(["-b", branch1.to_str().unwrap()])
        .args(["-c", branch2.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid record on line 1"));
}

#[test]
fn test_compare_text_report() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let expected = write_fixture(
        dir.path(),
        "expected.snps",
        "scaf_1\t100\tA\tC\nscaf_1\t200\tG\tR\nscaf_1\t300\tT\tA\n",
    );
    // Hits 100 and 200, misses 300, and calls an extra site at 400
    let observed = write_fixture(
        dir.path(),
        "observed.snp",
        "scaf_1\t100\tA\tC\nscaf_1\t200\tG\tR\nscaf_1\t400\tC\tT\n",
    );

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("True positives\t2\n"))
        .stdout(predicate::str::contains("False positives\t1\n"))
        .stdout(predicate::str::contains("True negatives\t996\n"))
        .stdout(predicate::str::contains("False negatives\t1\n"))
        .stdout(predicate::str::contains("Wrong calls\t0\n"))
        // 996 derived hom-ref matches plus the one site where the missed
        // truth variant left an implicit hom-ref call
        .stdout(predicate::str::contains("Homozygous ref\t997\n"))
        .stdout(predicate::str::contains("\nMatches:\nHomozygous ref\t996\n"))
        .stdout(predicate::str::contains("Heterozygous\t1\n"))
        .stdout(predicate::str::contains("Homozygous alt\t2\n"));
}

#[test]
fn test_compare_json_report() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let expected = write_fixture(dir.path(), "expected.snps", "scaf_1\t100\tA\tC\n");
    let observed = write_fixture(dir.path(), "observed.snp", "scaf_1\t100\tA\tC\n");

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"true_positives\": 1.0"))
        .stdout(predicate::str::contains("\"false_positives\": 0.0"))
        .stdout(predicate::str::contains("\"true_negatives\": 999.0"))
        .stdout(predicate::str::contains("\"sensitivity\": 1.0"));
}

#[test]
fn test_compare_writes_detail_logs() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let expected = write_fixture(
        dir.path(),
        "expected.snps",
        "scaf_1\t100\tA\tC\nscaf_1\t300\tT\tA\n",
    );
    let observed = write_fixture(
        dir.path(),
        "observed.snp",
        "scaf_1\t100\tA\tC\nscaf_1\t400\tC\tT\n",
    );
    let tps = dir.path().join("tps.snp");
    let fns = dir.path().join("fns.snp");
    let fps = dir.path().join("fps.snp");

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .args(["-t", tps.to_str().unwrap()])
        .args(["-n", fns.to_str().unwrap()])
        .args(["-p", fps.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&tps).unwrap(), "scaf_1\t100\tC\tC\n");
    assert_eq!(fs::read_to_string(&fns).unwrap(), "scaf_1\t300\tT\tA\n");
    assert_eq!(fs::read_to_string(&fps).unwrap(), "scaf_1\t400\tC\tT\n");
}

#[test]
fn test_compare_min_depth_excludes_uncallable_sites() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    // The site at 200 is below depth 10: it leaves every bucket, and the
    // observed call there is not penalized as a false positive
    let expected = write_fixture(
        dir.path(),
        "expected.snps",
        "scaf_1\t100\tA\tC\t30\nscaf_1\t200\tG\tT\t3\n",
    );
    let observed = write_fixture(
        dir.path(),
        "observed.snp",
        "scaf_1\t100\tA\tC\nscaf_1\t200\tG\tT\n",
    );

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .args(["-m", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("True positives\t1\n"))
        .stdout(predicate::str::contains("False positives\t0\n"))
        .stdout(predicate::str::contains("True negatives\t998\n"));
}

#[test]
fn test_compare_min_depth_requires_depth_column() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let expected = write_fixture(dir.path(), "expected.snps", "scaf_1\t100\tA\tC\n");
    let observed = write_fixture(dir.path(), "observed.snp", "");

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .args(["-m", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no depth column"));
}

#[test]
fn test_compare_unwritable_detail_path_fails() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let expected = write_fixture(dir.path(), "expected.snps", "scaf_1\t100\tA\tC\n");
    let observed = write_fixture(dir.path(), "observed.snp", "");

    snplog()
        .arg("compare")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-e", expected.to_str().unwrap()])
        .args(["-o", observed.to_str().unwrap()])
        .args(["-t", dir.path().join("missing-dir/tps.snp").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create true positive output file"));
}

#[test]
fn test_diploidize_combines_haploid_logs() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let hap1 = write_fixture(
        dir.path(),
        "hap1.snps",
        "scaf_1\t100\tA\tC\nscaf_1\t200\tA\tT\n",
    );
    let hap2 = write_fixture(dir.path(), "hap2.snps", "scaf_1\t100\tA\tT\n");

    snplog()
        .arg("diploidize")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-a", hap1.to_str().unwrap()])
        .args(["-b", hap2.to_str().unwrap()])
        .assert()
        .success()
        // C/T at the shared site collapses to Y; the solo T at 200 pairs with
        // its reference A into W
        .stdout("scaf_1\t100\tA\tY\nscaf_1\t200\tA\tW\n");
}

#[test]
fn test_diploidize_identical_inputs_round_trip() {
    let dir = TempDir::new().unwrap();
    let fai = write_fixture(dir.path(), "ref.fa.fai", FAI);
    let log = "scaf_1\t100\tA\tC\nscaf_1\t250\tG\tK\n";
    let hap1 = write_fixture(dir.path(), "hap1.snps", log);
    let hap2 = write_fixture(dir.path(), "hap2.snps", log);

    snplog()
        .arg("diploidize")
        .args(["-f", fai.to_str().unwrap()])
        .args(["-a", hap1.to_str().unwrap()])
        .args(["-b", hap2.to_str().unwrap()])
        .assert()
        .success()
        .stdout(log);
}

#[test]
fn test_help_lists_subcommands() {
    snplog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("diploidize"));
}
