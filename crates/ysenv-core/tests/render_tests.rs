//! Renderer tests: listing text, host commands and docker command lines

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use ysenv_core::render::docker::docker_run_args;
use ysenv_core::render::{render_docker, render_host, render_listing};
use ysenv_core::{
    Document, Environment, InstanceKind, InstanceResolver, RcFilePlan, ResolvedInstance,
};
use ysenv_fs::NormalizedPath;
use ysenv_test_utils::{DocumentBuilder, FixedHomeProbe, TestHome};

fn resolve(raw: &Value, env: &Environment, kind: InstanceKind, name: &str) -> ResolvedInstance {
    let probe = FixedHomeProbe::new("/root");
    let document = Document::from_value(raw).unwrap();
    InstanceResolver::new(env, &probe)
        .resolve(&document, kind, name)
        .unwrap()
}

fn rc_file_name(lines: &[&str]) -> String {
    RcFilePlan::derive(lines.iter().copied(), &NormalizedPath::new("/")).file_name
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn docker_listing_shows_provenance() {
    let raw = DocumentBuilder::new("~/env")
        .group_part("base", json!({"rc": ["export A=1"], "privileged": true, "tty": false}))
        .docker(
            "dev",
            json!({
                "groupParts": ["base"],
                "image": "alpine",
                "user": "dev",
                "env": ["A=1", "B=2"],
                "volume": ["~/src:~/src", "/tmp:/scratch:ro"],
                "rc": ["set -o vi"]
            }),
        )
        .build();
    let env = Environment::with_home("/home/dev");
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let expected = "\
basePath: /home/dev/env
vmHome: /root   (by via container)
image: alpine   (by instance)

Set option:
  --rm   (by default)
  --privileged   (by groupParts.base)
  #tty   (by groupParts.base)
  --user = dev   (by instance)
   --env = A=1   (by instance)
   --env = B=2   (by instance)

Volume list:
  /root/src --> /home/dev/src   (by instance)
  /scratch  --> /tmp   (by instance)

rc file:
  (by groupParts.base)
    export A=1
  (by instance)
    set -o vi
";
    assert_eq!(render_listing(&resolved, "/home/dev/env"), expected);
}

#[test]
fn host_listing_skips_docker_sections() {
    let raw = DocumentBuilder::new("/srv/env")
        .host("laptop", json!({"rc": ["a", "b"]}))
        .build();
    let env = Environment::with_home("/home/dev");
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");

    let expected = "\
basePath: /srv/env
rc file:
  (by instance)
    a
    b
";
    assert_eq!(render_listing(&resolved, "/srv/env"), expected);
}

#[test]
fn not_once_replaces_rm_in_listing() {
    let raw = DocumentBuilder::new("~/env")
        .docker("dev", json!({"image": "alpine", "vmHome": "/root", "notOnce": true}))
        .build();
    let env = Environment::with_home("/home/dev");
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let listing = render_listing(&resolved, "/home/dev/env");
    assert!(listing.contains("  #notOnce   (by instance)\n"));
    assert!(!listing.contains("--rm"));
}

// ============================================================================
// Host
// ============================================================================

#[test]
fn host_links_volumes_and_writes_rc() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .host(
            "laptop",
            json!({"volume": ["~/dotfiles/vimrc:~/.vimrc"], "rc": ["alias ll='ls -l'"]}),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");

    let outcome = render_host(&resolved, &env).unwrap();
    let rc_name = rc_file_name(&["alias ll='ls -l'"]);
    let root = home.path_str();
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(
        outcome.text,
        format!(
            "ln -sf '{root}/dotfiles/vimrc' '{root}/.vimrc'\n\
             echo \"Please run \\`source '{root}/{rc_name}'\\`\""
        )
    );
    home.assert_file_content(&rc_name, "alias ll='ls -l'");
}

#[test]
fn host_render_is_idempotent() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .host("laptop", json!({"rc": ["export EDITOR=vi"]}))
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");
    let rc_name = rc_file_name(&["export EDITOR=vi"]);
    home.write(&rc_name, "kept as is");

    let first = render_host(&resolved, &env).unwrap();
    let second = render_host(&resolved, &env).unwrap();

    assert_eq!(first, second);
    assert!(first.is_success());
    home.assert_file_content(&rc_name, "kept as is");
    assert_eq!(home.entries(), vec![rc_name]);
}

#[test]
fn real_file_in_the_way_only_warns() {
    let home = TestHome::new();
    let env = home.env();
    home.write(".vimrc", "mine");
    let raw = DocumentBuilder::new("~/env")
        .host(
            "laptop",
            json!({
                "volume": ["~/dotfiles/vimrc:~/.vimrc", "~/dotfiles/inputrc:~/.inputrc"],
                "rc": ["x"]
            }),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");

    let outcome = render_host(&resolved, &env).unwrap();
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(
        outcome.text,
        format!("echo \"Please delete '{}/.vimrc' manually\"", home.path_str())
    );
    home.assert_file_not_exists(&rc_file_name(&["x"]));
}

#[test]
fn stray_rc_files_are_reported_without_rc_field() {
    let home = TestHome::new();
    let env = home.env();
    home.write(".bashrc_ysenv_0000000", "old");
    let raw = DocumentBuilder::new("~/env")
        .host("laptop", json!({"volume": ["/opt/tool:/tmp/ysenv-never-created"]}))
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");

    let outcome = render_host(&resolved, &env).unwrap();
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(
        outcome.text,
        format!(
            "echo \"Please run \\`rm {}/.bashrc_ysenv_0000000\\`\"",
            home.path_str()
        )
    );
    home.assert_file_exists(".bashrc_ysenv_0000000");
}

#[cfg(unix)]
#[test]
fn existing_symlink_is_replaced() {
    let home = TestHome::new();
    let env = home.env();
    std::os::unix::fs::symlink("/nowhere", home.join(".vimrc")).unwrap();
    let raw = DocumentBuilder::new("~/env")
        .host("laptop", json!({"volume": ["~/dotfiles/vimrc:~/.vimrc"]}))
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Host, "laptop");

    let outcome = render_host(&resolved, &env).unwrap();
    assert!(outcome.is_success());
    assert!(outcome.text.starts_with("ln -sf "));
}

// ============================================================================
// Docker
// ============================================================================

fn flag_values<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
    args.windows(2)
        .filter(|pair| pair[0] == flag)
        .map(|pair| pair[1].as_str())
        .collect()
}

#[test]
fn volume_tokens_round_trip() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker(
            "dev",
            json!({
                "image": "alpine",
                "vmHome": "/root",
                "volume": ["~/src:~/src", "/data:/data:ro", "/old:/data/cache", "/new:/data/cache"]
            }),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let args = docker_run_args(&resolved, &env, &mut StdRng::seed_from_u64(3)).unwrap();
    let expected: Vec<String> = resolved
        .volumes
        .as_ref()
        .unwrap()
        .iter()
        .map(|v| v.to_spec())
        .collect();
    assert_eq!(flag_values(&args, "--volume"), expected);
    assert_eq!(expected.len(), 3);
}

/// Split a command line the way a POSIX shell does for single-quoted and
/// backslash-escaped words.
fn shell_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                quoted = !quoted;
                in_word = true;
            }
            '\\' if !quoted => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            ' ' if !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                current.push(other);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[test]
fn shell_words_undoes_quoting() {
    assert_eq!(
        shell_words(r"a 'b c' 'it'\''s' d"),
        vec!["a", "b c", "it's", "d"]
    );
}

#[test]
fn rendered_line_reparses_to_volume_triples() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker(
            "dev",
            json!({
                "image": "alpine",
                "vmHome": "/home/app",
                "volume": ["~/my docs:~/docs:ro", "/srv/it's here:/data", "/plain:/plain:rw"]
            }),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let outcome = render_docker(&resolved, &env, &mut StdRng::seed_from_u64(5)).unwrap();
    let words = shell_words(&outcome.text);
    let reparsed: Vec<(String, String, Option<String>)> = flag_values(&words, "--volume")
        .into_iter()
        .map(|spec| {
            let mut parts = spec.splitn(3, ':');
            let host = parts.next().unwrap().to_string();
            let container = parts.next().unwrap().to_string();
            (host, container, parts.next().map(str::to_string))
        })
        .collect();

    let expected: Vec<(String, String, Option<String>)> = resolved
        .volumes
        .as_ref()
        .unwrap()
        .iter()
        .map(|v| {
            (
                v.host_path.to_string(),
                v.container_path.to_string(),
                v.perm.clone(),
            )
        })
        .collect();
    assert_eq!(reparsed, expected);
    assert_eq!(
        reparsed[0],
        (
            format!("{}/my docs", home.path_str()),
            "/home/app/docs".to_string(),
            Some("ro".to_string())
        )
    );
}

#[test]
fn generated_name_serves_name_and_hostname() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker("dev", json!({"image": "alpine", "vmHome": "/root"}))
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let args = docker_run_args(&resolved, &env, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(&args[..3], ["docker", "run", "--rm"]);
    let name = flag_values(&args, "--name");
    let hostname = flag_values(&args, "--hostname");
    assert_eq!(name.len(), 1);
    assert_eq!(name, hostname);
    assert!(name[0].ends_with("-vm"));
    assert_eq!(name[0].len(), 10);
}

#[test]
fn explicit_name_is_reused_for_hostname() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker("dev", json!({"image": "alpine", "vmHome": "/root", "name": "web"}))
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let args = docker_run_args(&resolved, &env, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(flag_values(&args, "--name"), vec!["web"]);
    assert_eq!(flag_values(&args, "--hostname"), vec!["web"]);
}

#[test]
fn booleans_and_not_once() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker(
            "dev",
            json!({
                "image": "alpine",
                "vmHome": "/root",
                "notOnce": true,
                "privileged": true,
                "tty": false,
                "name": "web"
            }),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let outcome = render_docker(&resolved, &env, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(
        outcome.text,
        "docker run --privileged --name web --hostname web"
    );
}

#[test]
fn tokens_with_spaces_are_quoted() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker(
            "dev",
            json!({
                "image": "alpine",
                "vmHome": "/root",
                "name": "web",
                "env": ["GREETING=hello world"]
            }),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");

    let outcome = render_docker(&resolved, &env, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(
        outcome.text,
        "docker run --rm --name web --env 'GREETING=hello world' --hostname web"
    );
}

#[test]
fn rc_file_is_mounted_into_container_home() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker(
            "dev",
            json!({"image": "alpine", "vmHome": "/home/app", "name": "web", "rc": ["set -o vi"]}),
        )
        .build();
    let resolved = resolve(&raw, &env, InstanceKind::Docker, "dev");
    let rc_name = rc_file_name(&["set -o vi"]);

    let args = docker_run_args(&resolved, &env, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(
        flag_values(&args, "--volume"),
        vec![format!("{}/{}:/home/app/{}", home.path_str(), rc_name, rc_name)]
    );
    home.assert_file_content(&rc_name, "set -o vi");
}

#[test]
fn rc_mount_falls_back_to_user_home() {
    let home = TestHome::new();
    let env = home.env();
    let raw = DocumentBuilder::new("~/env")
        .docker("dev", json!({"image": "alpine", "name": "web", "rc": ["set -o vi"]}))
        .build();
    let probe = FixedHomeProbe::failing();
    let document = Document::from_value(&raw).unwrap();
    let resolved = InstanceResolver::new(&env, &probe)
        .resolve(&document, InstanceKind::Docker, "dev")
        .unwrap();
    let rc_name = rc_file_name(&["set -o vi"]);

    let args = docker_run_args(&resolved, &env, &mut StdRng::seed_from_u64(0)).unwrap();
    let mount = format!("{0}/{1}:{0}/{1}", home.path_str(), rc_name);
    assert_eq!(flag_values(&args, "--volume"), vec![mount.as_str()]);
}
