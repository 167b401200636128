use std::process::Command;

/// Build-time target identifiers and configuration paths with their defaults.
const TARGET_ENV: &[(&str, &str)] = &[
    ("BOOTD_TARGET_MACHINE", "generic"),
    ("BOOTD_TARGET_DISTRO", "linux"),
    ("BOOTD_TARGET_DISTRO_VARIANT", "normal"),
    ("BOOTD_DEBUG_CONF_FILE", "/var/preferences/bootd.json"),
    ("BOOTD_DEFAULT_CONF_FILE", "/etc/bootd/bootd.json"),
];

fn main() {
    // Inject git commit hash into build for version reporting
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output();

    let git_hash = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8(output.stdout).unwrap_or_else(|_| "unknown".to_string())
        }
        _ => "unknown".to_string(),
    };

    println!("cargo:rustc-env=GIT_HASH={}", git_hash.trim());

    // Image builds may override the version via VERSION
    let version = std::env::var("VERSION")
        .unwrap_or_else(|_| std::env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=BOOTD_VERSION={}", version);

    for (name, default) in TARGET_ENV {
        let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
        println!("cargo:rustc-env={}={}", name, value);
        println!("cargo:rerun-if-env-changed={}", name);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=VERSION");
}
