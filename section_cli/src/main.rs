//! # Section CLI
//!
//! Runs reinforced-concrete section analyses and prints text and JSON reports.
//!
//! ```text
//! section_cli                      run the built-in worked examples
//! section_cli <project.rcs>        run every analysis stored in a project file
//! section_cli --write <out.rcs>    save the worked examples as a project file
//! ```
//!
//! Set `RUST_LOG=debug` to trace solver iterations and diagram points.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::error;

use section_core::calculations::{
    AnalysisItem, AnalysisOutput, CapacityOutcome, ElasticInput, ElasticOutcome, UltimateInput,
    UltimateResult,
};
use section_core::file_io::{load_project, save_project};
use section_core::project::Project;
use section_core::section::{Reinforcement, SectionGeometry, SectionShape, WidthSegment};
use section_core::units::{Meters, Millimeters};
use section_core::CalcResult;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let loaded = match args.as_slice() {
        [] => Ok(worked_examples()),
        [flag, out] if flag == "--write" => {
            let project = worked_examples();
            return match save_project(&project, Path::new(out)) {
                Ok(()) => {
                    println!("Wrote {} analyses to {}", project.item_count(), out);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report_error(&e);
                    ExitCode::FAILURE
                }
            };
        }
        [path] => load_project(Path::new(path)),
        _ => {
            eprintln!("usage: section_cli [project.rcs | --write out.rcs]");
            return ExitCode::from(2);
        }
    };

    let project = match loaded {
        Ok(project) => project,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    println!("Section CLI - Reinforced Concrete Section Analysis");
    println!("==================================================");
    if !project.meta.job_id.is_empty() {
        println!("Job {} / {} / {}", project.meta.job_id, project.meta.client, project.meta.engineer);
    }

    let mut failures = 0;
    for id in project.sorted_ids() {
        let item = &project.items[&id];
        println!();
        match project.analyze(&id) {
            Ok(output) => print_output(item, &output),
            Err(e) => {
                error!("{} '{}' failed: {}", item.calc_type(), item.label(), e);
                report_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// The standard sections: a rectangular beam, a circular column and a T-beam.
fn worked_examples() -> Project {
    let mut project = Project::new("Worked examples", "EX-001", "section_core");
    let concrete = project.settings.concrete(30.0);
    let steel = project.settings.steel(500.0);

    let cover: Meters = Millimeters(50.0).into();
    let rectangle = SectionGeometry::new(
        SectionShape::Rectangular { width_m: 0.3, height_m: 0.5 },
        vec![
            Reinforcement::bars(5, 16.0, 0.5 - cover.0),
            Reinforcement::bars(4, 12.0, cover.0),
        ],
    );
    let circle = SectionGeometry::circular_bar_ring(0.25, 0.2, 10, 16.0);
    let tee = SectionGeometry::new(
        SectionShape::Stepped {
            segments: vec![
                WidthSegment { until_depth_m: 0.12, width_m: 1.2 },
                WidthSegment { until_depth_m: 0.6, width_m: 0.2 },
                WidthSegment { until_depth_m: 0.75, width_m: 0.4 },
            ],
        },
        vec![Reinforcement::new(0.04, 1664e-6), Reinforcement::new(0.68, 5485e-6)],
    );

    project.add_item(AnalysisItem::Elastic(ElasticInput::new(
        "1 Rectangle SLS",
        rectangle.clone(),
        6.06,
        90.0,
        130.0,
    )));
    project.add_item(AnalysisItem::Elastic(ElasticInput::new(
        "2 Circle SLS",
        circle.clone(),
        6.06,
        200.0,
        90.0,
    )));
    project.add_item(AnalysisItem::Ultimate(UltimateInput {
        label: "3 Rectangle ULS".to_string(),
        section: rectangle,
        concrete,
        steel,
        reference_depth_m: None,
        ned_kn: Some(400.0),
        med_knm: Some(150.0),
    }));
    project.add_item(AnalysisItem::Ultimate(UltimateInput {
        label: "4 Circle ULS".to_string(),
        section: circle,
        concrete,
        steel,
        reference_depth_m: None,
        ned_kn: Some(300.0),
        med_knm: None,
    }));
    project.add_item(AnalysisItem::Ultimate(UltimateInput {
        label: "5 T-section ULS".to_string(),
        section: tee,
        concrete,
        steel,
        reference_depth_m: None,
        ned_kn: Some(1200.0),
        med_knm: None,
    }));
    project
}

fn print_output(item: &AnalysisItem, output: &AnalysisOutput) {
    println!("═══════════════════════════════════════");
    println!("  {} ({})", item.label(), item.calc_type());
    println!("═══════════════════════════════════════");
    let section = item.section();
    println!(
        "  h = {:.3} m, d = {:.3} m, As = {:.2} cm²",
        section.height_m(),
        section.effective_depth_m(),
        section.steel_area_m2() * 1e4
    );

    match output {
        AnalysisOutput::Ultimate(result) => print_ultimate(result),
        AnalysisOutput::Elastic { outcome } => print_elastic(outcome),
    }

    println!();
    println!("JSON Output:");
    if let Err(e) = print_json(output) {
        report_error(&e);
    }
}

fn print_ultimate(result: &UltimateResult) {
    let diagram = &result.diagram;
    println!(
        "  fcd = {:.2} MPa, fyd = {:.1} MPa, εc2 = {:.5}, εcu2 = {:.5}",
        result.concrete_law.fcd_mpa,
        result.steel_law.fyd_mpa,
        result.concrete_law.ec2,
        result.concrete_law.ecu2
    );
    println!();
    println!("  {:>10} {:>10} {:>8} {:>8}", "NRd [kN]", "MRd [kNm]", "x [mm]", "x/d");
    for point in &diagram.points {
        let x: Millimeters = Meters(point.neutral_axis_m).into();
        println!(
            "  {:>10.1} {:>10.1} {:>8.1} {:>8.3}",
            point.nrd_kn,
            point.mrd_knm,
            x.0.min(99_999.9),
            point.x_over_d().min(999.0)
        );
    }
    println!();
    println!("  NRd range: {:.1} .. {:.1} kN", diagram.nrd_min(), diagram.nrd_max());

    match &result.capacity {
        Some(CapacityOutcome::Within { point }) => {
            println!(
                "  RESULT: [OK] MRd = {:.1} kNm at NEd = {:.1} kN (x/d = {:.3})",
                point.mrd_knm,
                point.nrd_kn,
                point.x_over_d()
            );
        }
        Some(CapacityOutcome::BelowRange { ned_kn, bound }) => {
            println!(
                "  RESULT: [FAIL] NEd = {:.1} kN < NRdmin = {:.1} kN (MRd there {:.1} kNm)",
                ned_kn, bound.nrd_kn, bound.mrd_knm
            );
        }
        Some(CapacityOutcome::AboveRange { ned_kn, bound }) => {
            println!(
                "  RESULT: [FAIL] NEd = {:.1} kN > NRdmax = {:.1} kN (MRd there {:.1} kNm)",
                ned_kn, bound.nrd_kn, bound.mrd_knm
            );
        }
        None => {}
    }

    if let Some(design) = &result.bending_design {
        println!(
            "  Design aid: MEd = {:.1} kNm, μ = {:.3}, ω = {:.3}, As,req = {:.2} cm²",
            design.med_knm,
            design.reduced_moment,
            design.omega,
            design.required_area_m2 * 1e4
        );
    }
}

fn print_elastic(outcome: &ElasticOutcome) {
    let state = outcome.state();
    let x: Millimeters = Meters(state.neutral_axis_m).into();
    println!(
        "  x = {:.1} mm after {} iteration(s), A* = {:.4} m², I* = {:.6} m⁴",
        x.0, state.iterations, state.transformed_area_m2, state.transformed_inertia_m4
    );

    match outcome {
        ElasticOutcome::Converged(solution) => {
            println!("  σc (top)   = {:.2} MPa", solution.concrete_stress_mpa());
            for bar in &solution.steel_stresses {
                println!("  σs @ {:.3} m = {:.1} kPa", bar.depth_m, bar.stress_kpa);
            }
            println!("  RESULT: [OK] max steel tension {:.1} MPa", solution.max_steel_tension_mpa());
        }
        ElasticOutcome::NotConverged(_) => {
            println!("  RESULT: [FAIL] did not converge");
        }
        ElasticOutcome::Invalid(_) => {
            println!("  RESULT: [FAIL] no compressed zone satisfies equilibrium");
        }
    }
}

fn print_json(output: &AnalysisOutput) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn report_error(e: &section_core::CalcError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
