use serde_json::Value;
use test_log::test;
mod utils;
use utils::{generate, list_files, print_dir_diff, read};

const QUICK: &str = r#"{"name":"quick-app","frontendFramework":"react","language":"typescript","bundler":"vite","styling":"tailwind","backend":"express","database":"none","deployment":"docker"}"#;

#[test]
fn test_react_vite_express_docker() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let root = generate(tmp_dir.path(), QUICK);
    let files = list_files(&root);

    for expected in [
        "src/main.tsx",
        "src/App.tsx",
        "server/src/server.ts",
        "docker-compose.yml",
        "Dockerfile.frontend",
        "Dockerfile.backend.node",
        "package.json",
        ".env",
        ".env.example",
    ] {
        assert!(files.contains(expected), "missing {expected}: {files:?}");
    }

    let manifest: Value = serde_json::from_str(&read(&root, "package.json")).unwrap();
    let dev = manifest["scripts"]["dev"].as_str().unwrap();
    assert!(dev.starts_with("concurrently "));
    assert!(dev.contains("vite"));
    assert!(dev.contains("nodemon"));
}

#[test]
fn test_python_fastapi_postgresql_without_frontend() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let root = generate(
        tmp_dir.path(),
        r#"{"name":"api","frontendFramework":"skip","backend":"python","pythonFramework":"fastapi","database":"postgresql","deployment":"none"}"#,
    );
    let files = list_files(&root);

    assert!(files.contains("server/main.py"));
    assert!(files.contains("server/app/routers/todos.py"));
    assert!(files.contains("server/app/database.py"));
    assert!(!files.iter().any(|path| path.starts_with("src/")));
    assert!(!files.iter().any(|path| path.starts_with("server/src/")));

    let requirements = read(&root, "server/requirements.txt");
    assert!(requirements.contains("psycopg2-binary"));

    let manifest: Value = serde_json::from_str(&read(&root, "package.json")).unwrap();
    let dependencies = manifest["dependencies"].as_object().cloned().unwrap_or_default();
    for python_package in ["fastapi", "uvicorn", "psycopg2-binary", "sqlalchemy"] {
        assert!(!dependencies.contains_key(python_package));
    }
    for node_driver in ["pg", "mysql2", "mongoose", "mongodb", "redis", "sqlite3"] {
        assert!(!dependencies.contains_key(node_driver));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let answers = r#"{"name":"twice","frontendFramework":"vue","backend":"koa","database":"mongodb","deployment":"heroku"}"#;

    let first_root = generate(first.path(), answers);
    let second_root = generate(second.path(), answers);

    assert_eq!(read(&first_root, "package.json"), read(&second_root, "package.json"));
    let different = dir_diff::is_different(&first_root, &second_root).unwrap();
    if different {
        print_dir_diff(&first_root, &second_root);
    }
    assert!(!different);
}

#[test]
fn test_fastify_redis_close_before_connect() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let root = generate(
        tmp_dir.path(),
        r#"{"name":"cache","frontendFramework":"skip","language":"typescript","backend":"fastify","database":"redis","deployment":"none"}"#,
    );
    let module = read(&root, "server/src/database/redis.ts");
    let close = module.split("async function closeDatabase()").nth(1).unwrap();
    let guard = close.find("if (!client)").unwrap();
    let quit = close.find("client.quit()").unwrap();
    assert!(guard < quit);
    assert!(read(&root, ".env").contains("REDIS_URL="));
}

#[test]
fn test_database_env_is_merged_once_under_marker() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let root = generate(
        tmp_dir.path(),
        r#"{"name":"shop","backend":"express","database":"mysql","deployment":"docker"}"#,
    );
    let env = read(&root, ".env");
    assert_eq!(env.matches(stackforge::constants::ENV_MARKER).count(), 1);
    assert_eq!(env.matches("\nDATABASE_URL=").count(), 1);
    assert!(env.starts_with("NODE_ENV=development\n"));
    assert_eq!(env, read(&root, ".env.example"));

    let compose = read(&root, "docker-compose.yml");
    assert!(compose.contains("mysql:8.0"));
}

#[test]
fn test_existing_files_are_never_overwritten() {
    let tmp_dir = tempfile::tempdir().unwrap();
    std::fs::write(tmp_dir.path().join("keep.txt"), "mine").unwrap();
    let args = stackforge::cli::Args {
        name: None,
        output_dir: Some(tmp_dir.path().to_path_buf()),
        verbose: 0,
        answers: Some(QUICK.to_string()),
        answers_file: None,
        quick: false,
        non_interactive: true,
        dry_run: false,
        skip_install: true,
    };
    let result = stackforge::cli::runner::Runner::new(args)
        .run_with(&stackforge::prompt::DefaultsPrompter, utils::NoopRunner);
    assert!(matches!(
        result,
        Err(stackforge::error::Error::OutputDirectoryNotEmpty { .. })
    ));
    assert_eq!(list_files(tmp_dir.path()).len(), 1);
}

#[cfg(unix)]
#[test]
fn test_python_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let tmp_dir = tempfile::tempdir().unwrap();
    let root = generate(
        tmp_dir.path(),
        r#"{"name":"dj","frontendFramework":"skip","backend":"python","pythonFramework":"django","deployment":"none"}"#,
    );
    for script in ["server/start_server.sh", "server/manage.py"] {
        let mode = std::fs::metadata(root.join(script)).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111, "{script} is not executable");
    }
}
