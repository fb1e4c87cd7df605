//! Step analysis examples for the closed-loop engine
//!
//! Builds second-order plants, closes the loop with different controllers
//! and prints the resulting transfer functions, pole locations, stability
//! metrics and sampled step responses.

use linsys::prelude::*;

fn main() {
    println!("Closed-Loop Step Analysis");
    println!("=========================\n");

    // Example 1: the default second-order plant by itself
    example_1_uncontrolled_plant();

    // Example 2: PID control with integral action
    example_2_pid_control();

    // Example 3: state feedback on the two-state plant
    example_3_state_feedback();
}

fn example_1_uncontrolled_plant() {
    println!("Example 1: Uncontrolled Plant");
    println!("-----------------------------");
    println!("G(s) with ωn = 5 rad/s, ζ = 0.7, K = 1");
    println!();

    let plant = Plant::NaturalFrequency {
        omega_n: 5.0,
        zeta: 0.7,
        gain: 1.0,
    };
    let analysis = analyze(&plant, &Controller::None);
    print_report(&analysis);
}

fn example_2_pid_control() {
    println!("Example 2: PID Control");
    println!("----------------------");
    println!("C(s) = (0.1s² + 2s + 1)/s on the same plant");
    println!();

    let plant = Plant::NaturalFrequency {
        omega_n: 5.0,
        zeta: 0.7,
        gain: 1.0,
    };
    let controller = Controller::Pid {
        kp: 2.0,
        ki: 1.0,
        kd: 0.1,
    };
    let analysis = analyze(&plant, &controller);
    print_report(&analysis);
}

fn example_3_state_feedback() {
    println!("Example 3: State Feedback");
    println!("-------------------------");
    println!("A = [0, 1; -25, -7] closed with K = [1, 1]");
    println!();

    let plant = Plant::StateSpace {
        a11: 0.0,
        a12: 1.0,
        a21: -25.0,
        a22: -7.0,
    };
    let controller = Controller::StateFeedback { k1: 1.0, k2: 1.0 };
    let analysis = analyze(&plant, &controller);
    print_report(&analysis);
}

fn print_report(analysis: &Analysis) {
    println!("Plant:       {}", analysis.plant_tf);
    println!("Closed loop: {}", analysis.closed_loop.tf);
    println!();

    println!("Closed-loop poles:");
    for p in &analysis.closed_loop.poles {
        println!("  {:10.4} {:+10.4}j", p.re, p.im);
    }
    if !analysis.closed_loop.zeros.is_empty() {
        println!("Closed-loop zeros:");
        for z in &analysis.closed_loop.zeros {
            println!("  {:10.4} {:+10.4}j", z.re, z.im);
        }
    }
    println!();

    let m = &analysis.metrics;
    println!("Stability metrics:");
    println!("  Stable:        {}", if m.is_stable { "yes" } else { "NO" });
    println!("  ωn:            {:.4} rad/s", m.omega_n);
    println!("  ζ:             {:.4}", m.zeta);
    match m.overshoot_pct {
        Some(v) => println!("  Overshoot:     {:.2} %", v),
        None => println!("  Overshoot:     n/a"),
    }
    match m.settling_time {
        Some(v) => println!("  Settling time: {:.4} s", v),
        None => println!("  Settling time: n/a"),
    }
    println!();

    println!("{:>8} {:>12}", "Time", "Step Output");
    println!("{:-<8} {:-<12}", "", "");
    for (t, y) in analysis
        .step
        .t
        .iter()
        .zip(&analysis.step.y)
        .step_by(125)
    {
        println!("{:8.3} {:12.6}", t, y);
    }
    println!(
        "  Final value: {:.6} (DC gain {:.6})",
        analysis.step.y.last().copied().unwrap_or(0.0),
        analysis.closed_loop.dc_gain()
    );
    println!();
}
