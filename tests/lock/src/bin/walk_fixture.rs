//! Binary that runs a fixed seeded walk and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `walk_fixture`
//!
//! Output: key=value lines (see source for format).

use ribbon_harness::input::LinkSpec;
use ribbon_harness::runner::{run, RunConfigV1};
use ribbon_kernel::invariants::fingerprint::diagram_fingerprint;
use ribbon_search::policy::WalkPolicyV1;

fn main() {
    let specs = ["6_1", "square", "3_1", "[1,-2,1,-2]"]
        .iter()
        .map(|s| LinkSpec::parse(s).expect("fixture spec parses"))
        .collect();
    let config = RunConfigV1 {
        specs,
        policy: WalkPolicyV1 {
            max_bands: 3,
            max_tries: 5,
            ..WalkPolicyV1::default()
        },
        seed: 2024,
        ..RunConfigV1::default()
    };
    let out = run(&config).expect("walk failed");
    let report = &out.report;

    println!(
        "report_digest={}",
        report.content_hash().expect("report serializes").as_str()
    );
    println!("max_size={}", out.max_size);
    println!("total_steps={}", report.total_steps);
    println!("total_episodes={}", report.total_episodes);
    println!("succeeded={}", report.succeeded().join(","));
    println!("failed={}", report.failed().join(","));
    for link in &out.links {
        println!(
            "input_fingerprint[{}]={}",
            link.name,
            diagram_fingerprint(&link.diagram).as_str()
        );
    }
}
