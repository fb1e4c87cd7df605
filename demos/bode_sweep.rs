//! Bode sweep examples
//!
//! Sweeps closed-loop frequency responses over the standard logarithmic
//! grid and reports magnitude, unwrapped phase and the named crossover
//! frequencies.

use linsys::prelude::*;

fn main() {
    println!("Closed-Loop Bode Sweep");
    println!("======================\n");

    // Example 1: first-order lag, corner at 1/τ
    example_1_first_order();

    // Example 2: second-order plant under PID control
    example_2_pid_loop();
}

fn example_1_first_order() {
    println!("Example 1: First-Order Lag");
    println!("--------------------------");
    println!("G(s) = 1/(2s + 1): corner frequency 0.5 rad/s");
    println!();

    let plant = Plant::TimeConstant {
        tau: 2.0,
        gain: 1.0,
    };
    let cl = ClosedLoopSystem::synthesize(&plant, &Controller::None);
    print_sweep(&cl);
}

fn example_2_pid_loop() {
    println!("Example 2: PID Loop");
    println!("-------------------");
    println!("C(s) = (0.1s² + 2s + 1)/s on 25/(s² + 7s + 25)");
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
    let cl = ClosedLoopSystem::synthesize(&plant, &controller);
    print_sweep(&cl);
}

fn print_sweep(cl: &ClosedLoopSystem) {
    let resp = frequency_response(&cl.tf);
    let cross = crossover_frequencies(&resp);

    println!("H(s) = {}", cl.tf);
    println!();
    println!(
        "{:>12} {:>12} {:>12}",
        "ω [rad/s]", "Mag [dB]", "Phase [°]"
    );
    println!("{:-<12} {:-<12} {:-<12}", "", "", "");

    for ((w, mag), ph) in resp
        .omega
        .iter()
        .zip(&resp.magnitude_db)
        .zip(&resp.phase_deg)
        .step_by(30)
    {
        println!("{:12.4} {:12.3} {:12.2}", w, mag, ph);
    }
    println!();

    println!("Crossover frequencies:");
    print_crossover("-3 dB bandwidth", cross.bandwidth_3db);
    print_crossover("-45° phase", cross.phase_45);
    print_crossover("-90° phase", cross.phase_90);
    print_crossover("-135° phase", cross.phase_135);
    println!();
}

fn print_crossover(label: &str, value: Option<f64>) {
    match value {
        Some(w) => println!("  {:<16} {:.4} rad/s", label, w),
        None => println!("  {:<16} not reached", label),
    }
}
