use report_augment::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../report-augment.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.paths.summary, "results/compare/summary.json");
    assert_eq!(cfg.paths.metadata, "results/DQN/train_meta.json");
    assert_eq!(cfg.annotation.target_key(), "DQN_training");
    assert_eq!(cfg.annotation.default_training_steps, 50000);
    assert_eq!(cfg.annotation.original_planned_steps, 200000);
}

#[test]
fn partial_config_keeps_defaults() {
    let cfg: Config = toml::from_str("[annotation]\nalgorithm = \"PPO\"\n").expect("parse TOML");
    assert_eq!(cfg.annotation.target_key(), "PPO_training");
    assert_eq!(cfg.annotation.default_training_steps, 50000);
    assert!(cfg.global.print_summary);
    assert!(!cfg.logging.write_to_file);
}

#[test]
fn explicit_key_wins() {
    let cfg: Config =
        toml::from_str("[annotation]\nalgorithm = \"PPO\"\nkey = \"budget\"\n").expect("parse TOML");
    assert_eq!(cfg.annotation.target_key(), "budget");
}
