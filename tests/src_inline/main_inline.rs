use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("edd_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn run_args(cli: Cli) -> RunArgs {
    match cli.command {
        Command::Run(args) => args,
        other => panic!("expected run command, got {other:?}"),
    }
}

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from([
        "edd", "run", "--ip", "ip.bed", "--control", "ctl.bed", "--chrom-sizes", "hg.sizes",
        "--out", "out",
    ])
    .unwrap();
    assert!(!cli.verbose);
    let args = run_args(cli);
    let profile = resolve_run_profile(&args).unwrap();
    assert_eq!(profile.bin_size, 10_000);
    assert_eq!(profile.max_ratio, 0.5);
    assert!(profile.normalize);
    assert_eq!(profile.score_function, ScoreFunctionKind::LogRatio);
    assert_eq!(profile.drop_gaps_smaller_than, 0);
}

#[test]
fn test_parse_run_overrides() {
    let cli = Cli::try_parse_from([
        "edd",
        "-v",
        "run",
        "--ip",
        "ip.bed",
        "--control",
        "ctl.bed",
        "--chrom-sizes",
        "hg.sizes",
        "--out",
        "out",
        "--bin-size",
        "2KB",
        "--max-ratio",
        "0.2",
        "--no-normalize",
        "--score",
        "difference",
        "--drop-gaps-smaller-than",
        "5000",
    ])
    .unwrap();
    assert!(cli.verbose);
    let profile = resolve_run_profile(&run_args(cli)).unwrap();
    assert_eq!(profile.bin_size, 2_000);
    assert_eq!(profile.max_ratio, 0.2);
    assert!(!profile.normalize);
    assert_eq!(profile.score_function, ScoreFunctionKind::Difference);
    assert_eq!(profile.drop_gaps_smaller_than, 5_000);
}

#[test]
fn test_bad_bin_size_is_size_error() {
    let cli = Cli::try_parse_from([
        "edd", "run", "--ip", "a", "--control", "b", "--chrom-sizes", "c", "--out", "d",
        "--bin-size", "10mb",
    ])
    .unwrap();
    let err = resolve_run_profile(&run_args(cli)).unwrap_err();
    assert!(matches!(err, PipelineError::Size(_)));
}

#[test]
fn test_zero_bin_size_rejected() {
    let cli = Cli::try_parse_from([
        "edd", "run", "--ip", "a", "--control", "b", "--chrom-sizes", "c", "--out", "d",
        "--bin-size", "0",
    ])
    .unwrap();
    assert!(matches!(
        resolve_run_profile(&run_args(cli)),
        Err(PipelineError::Input(InputError::InvalidInput(_)))
    ));
}

#[test]
fn test_max_ratio_bounds() {
    assert_eq!(parse_max_ratio("1"), Ok(1.0));
    assert_eq!(parse_max_ratio("0.25"), Ok(0.25));
    assert!(parse_max_ratio("0").is_err());
    assert!(parse_max_ratio("1.5").is_err());
    assert!(parse_max_ratio("NaN").is_err());
    assert!(parse_max_ratio("lots").is_err());
}

#[test]
fn test_cli_rejects_out_of_range_ratio() {
    let res = Cli::try_parse_from([
        "edd", "scored", "--bedgraph", "s.bg", "--out", "o", "--max-ratio", "2",
    ]);
    assert!(res.is_err());
}

#[test]
fn test_run_experiment_end_to_end() {
    let dir = make_temp_dir();
    write_file(&dir.join("sizes"), "chr1\t1000\nchr2\t500\n");
    let mut ip = String::new();
    for _ in 0..20 {
        ip.push_str("chr1\t300\t350\n");
    }
    for i in 0..10 {
        ip.push_str(&format!("chr1\t{}\t{}\n", i * 100, i * 100 + 50));
        ip.push_str(&format!("chr2\t{}\t{}\n", (i % 5) * 100, (i % 5) * 100 + 50));
    }
    write_file(&dir.join("ip.bed"), &ip);
    let mut control = String::new();
    for i in 0..10 {
        control.push_str(&format!("chr1\t{}\t{}\n", i * 100, i * 100 + 50));
        control.push_str(&format!("chr2\t{}\t{}\n", (i % 5) * 100, (i % 5) * 100 + 50));
    }
    write_file(&dir.join("control.bed"), &control);
    write_file(&dir.join("gaps.bed"), "chr1\t800\t900\n");

    let out = dir.join("out");
    let cli = Cli::try_parse_from([
        "edd",
        "run",
        "--ip",
        dir.join("ip.bed").to_str().unwrap(),
        "--control",
        dir.join("control.bed").to_str().unwrap(),
        "--chrom-sizes",
        dir.join("sizes").to_str().unwrap(),
        "--gaps",
        dir.join("gaps.bed").to_str().unwrap(),
        "--bin-size",
        "100",
        "--out",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run(&cli.command).unwrap();

    let bedgraph = fs::read_to_string(out.join("binary_bins.bedgraph")).unwrap();
    assert!(bedgraph.contains("chr1\t300\t400\t1\n"));
    assert!(!bedgraph.contains("chr1\t800\t900"));
    assert_eq!(bedgraph.lines().count(), 1 + 14);

    let json = fs::read_to_string(out.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["input"]["bin_size"], 100);
    assert_eq!(value["bins"]["n_runs"], 3);
    assert_eq!(value["cutoff"]["path"], "optimal");
}

#[test]
fn test_run_scored_end_to_end() {
    let dir = make_temp_dir();
    let mut bg = String::new();
    for i in 0..10 {
        let score = if i == 0 { 0.0 } else { 4.0 + i as f64 / 10.0 };
        bg.push_str(&format!("chr1\t{}\t{}\t{}\n", i * 100, i * 100 + 100, score));
    }
    write_file(&dir.join("scores.bg"), &bg);
    let out = dir.join("out");
    let cli = Cli::try_parse_from([
        "edd",
        "scored",
        "--bedgraph",
        dir.join("scores.bg").to_str().unwrap(),
        "--max-ratio",
        "0.2",
        "--out",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run(&cli.command).unwrap();

    let json = fs::read_to_string(out.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["cutoff"]["path"], "fallback");
    assert_eq!(value["bins"]["n_enriched"], 2);
    assert!(value.get("reads").is_none());
}

#[test]
fn test_missing_input_file_fails() {
    let dir = make_temp_dir();
    let cli = Cli::try_parse_from([
        "edd",
        "scored",
        "--bedgraph",
        dir.join("absent.bg").to_str().unwrap(),
        "--out",
        dir.join("out").to_str().unwrap(),
    ])
    .unwrap();
    assert!(matches!(
        run(&cli.command),
        Err(PipelineError::Input(InputError::MissingInput(_)))
    ));
}
