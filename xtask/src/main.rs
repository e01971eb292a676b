#![deny(unused_must_use)]

use std::{env, path::PathBuf};

use xshell::cmd;

/// Feature sets the device crate is tested with, one per node role.
const ROLE_FEATURES: &[&str] = &[
    "std log",
    "std log end-device",
    "std log cli-extension auto-start",
];

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(|s| &**s).collect::<Vec<_>>();

    match &args[..] {
        ["ci"] => test_ci(),
        ["test"] => test_device(),
        ["update"] => update(),
        _ => {
            println!("USAGE cargo xtask [ci|test|update]");
            Ok(())
        }
    }
}

fn update() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(root_dir())?;
    cmd!("cargo update").run()?;
    Ok(())
}

fn test_ci() -> Result<(), anyhow::Error> {
    let _e = xshell::pushenv("CI", "true");
    test_device()?;
    build_sim()?;
    Ok(())
}

fn test_device() -> Result<(), anyhow::Error> {
    let mut device = root_dir();
    device.push("device");

    let _p = xshell::pushd(&device)?;
    for features in ROLE_FEATURES {
        println!("Testing device with features '{}'", features);
        cmd!("cargo test --no-default-features --features {features}").run()?;
    }
    cmd!("cargo check --no-default-features").run()?;
    Ok(())
}

fn build_sim() -> Result<(), anyhow::Error> {
    let mut app = root_dir();
    app.push("apps");
    app.push("sim-node");

    let _p = xshell::pushd(&app)?;
    cmd!("cargo build").run()?;
    cmd!("cargo build --features end-device").run()?;
    Ok(())
}

fn root_dir() -> PathBuf {
    let mut xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.pop();
    xtask_dir
}
