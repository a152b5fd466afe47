//! `docker run` command line

use rand::Rng;
use ysenv_fs::NormalizedPath;

use crate::Result;
use crate::environment::Environment;
use crate::field::{AttributedField, Scalar, names};
use crate::resolver::ResolvedInstance;

use super::rc::RcFilePlan;
use super::shell::quote_if_needed;
use super::{Outcome, is_internal};

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NAME_LEN: usize = 7;

/// A random container name such as `qwhzkcd-vm`.
pub fn random_vm_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name: String = (0..NAME_LEN)
        .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
        .collect();
    name.push_str("-vm");
    name
}

/// Build the `docker run` tokens for `instance`.
///
/// When `rc` is present its file is written under the user's home (if
/// absent) and mounted into the container home.
pub fn docker_run_args<R: Rng + ?Sized>(
    instance: &ResolvedInstance,
    env: &Environment,
    rng: &mut R,
) -> Result<Vec<String>> {
    let fields = &instance.fields;
    let mut args = vec!["docker".to_string(), "run".to_string()];

    if !fields.is_true(names::NOT_ONCE) {
        args.push("--rm".to_string());
    }

    let generated = random_vm_name(rng);
    if !fields.contains(names::NAME) {
        args.extend(["--name".to_string(), generated.clone()]);
    }
    if !fields.contains(names::HOSTNAME) {
        args.extend(["--hostname".to_string(), generated]);
    }

    for (key, field) in fields.iter().filter(|(key, _)| !is_internal(key)) {
        let flag = format!("--{}", key);
        match field {
            AttributedField::List(list) => {
                for element in list.iter() {
                    args.push(flag.clone());
                    args.push(element.value.to_string());
                }
            }
            AttributedField::Scalar(scalar) => match &scalar.value {
                Scalar::Flag(true) => args.push(flag),
                Scalar::Flag(false) => {}
                value => {
                    args.push(flag);
                    args.push(value.to_string());
                }
            },
        }
    }

    for volume in instance.volumes.iter().flatten() {
        args.push("--volume".to_string());
        args.push(volume.to_spec());
    }

    if let Some(rc) = instance.rc() {
        let plan = RcFilePlan::from_list(rc, env.home());
        plan.materialize()?;

        let container_home = instance
            .container_home()
            .map(NormalizedPath::new)
            .unwrap_or_else(|| env.home().clone());
        args.push("--volume".to_string());
        args.push(format!(
            "{}:{}",
            plan.file_path,
            container_home.join(&plan.file_name)
        ));
    }

    Ok(args)
}

/// Render the `docker run` command line for `instance`.
pub fn render_docker<R: Rng + ?Sized>(
    instance: &ResolvedInstance,
    env: &Environment,
    rng: &mut R,
) -> Result<Outcome> {
    let args = docker_run_args(instance, env, rng)?;
    let line = args
        .iter()
        .map(|arg| quote_if_needed(arg))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Outcome::success(line))
}
