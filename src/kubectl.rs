use std::{
    ffi::{OsStr, OsString},
    io::Write,
};

use subprocess::{Exec, PopenError, Redirection};

use crate::{options::KubectlOptions, util::IdentStr, Error, Result};

/// Global kubectl flags for options, followed by command args
pub fn kubectl_args<S: AsRef<OsStr>>(options: &KubectlOptions, args: &[S]) -> Vec<OsString> {
    let mut out = Vec::new();
    if let Some(context) = &options.context_name {
        out.push("--context".into());
        out.push(context.into());
    }
    if let Some(path) = &options.config_path {
        out.push("--kubeconfig".into());
        out.push(path.into());
    }
    if let Some(namespace) = &options.namespace {
        out.push("--namespace".into());
        out.push(namespace.into());
    }
    out.extend(args.iter().map(|a| a.as_ref().to_owned()));
    out
}

/// Run kubectl, returning captured stdout
pub fn run_kubectl<S: AsRef<OsStr>>(options: &KubectlOptions, args: &[S]) -> Result<String> {
    let args = kubectl_args(options, args);
    log::debug!("Running kubectl {:?}", args);

    let mut cmd = Exec::cmd("kubectl").args(&args[..]);
    for (key, value) in options.env.iter() {
        cmd = cmd.env(key, value);
    }
    let capture = cmd
        .stderr(Redirection::Pipe)
        .capture()
        .map_err(|e| match e {
            PopenError::IoError(io) => Error::KubectlNotFound(io),
            e => Error::Popen(e),
        })?;

    if !capture.success() {
        return Err(Error::Kubectl(IdentStr(capture.stderr_str())));
    }
    let stdout = capture.stdout_str();
    log::trace!("= {}", stdout);
    Ok(stdout)
}

fn run_with_manifest(options: &KubectlOptions, verb: &str, manifest: &str) -> Result<String> {
    // Removed on drop
    let mut file = tempfile::Builder::new()
        .prefix("kuberole-")
        .suffix(".yaml")
        .tempfile()?;
    file.write_all(manifest.as_bytes())?;
    file.flush()?;

    run_kubectl(
        options,
        &[OsStr::new(verb), OsStr::new("-f"), file.path().as_os_str()],
    )
}

/// `kubectl apply` manifest given as string, returning kubectl output
pub fn kubectl_apply_from_string(options: &KubectlOptions, manifest: &str) -> Result<String> {
    run_with_manifest(options, "apply", manifest)
}

/// `kubectl delete` every resource declared in manifest given as string
pub fn kubectl_delete_from_string(options: &KubectlOptions, manifest: &str) -> Result<String> {
    run_with_manifest(options, "delete", manifest)
}
