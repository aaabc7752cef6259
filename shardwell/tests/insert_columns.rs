use std::io::Write;

use shardwell::{
    logger, InsertColumnsClause, InsertColumnsTokenGenerator, InsertStatement, Rule, Schema,
    SqlToken, Statement, TableMetadata, TokenContext, TokenGenerators,
};
use shardwell_config::Config;

const SHARDING: &str = r#"
[general]
query_with_cipher_column = false

[[sharding.tables]]
name = "t_order"
key_generator_column = "order_id"

[sharding.encrypt.encryptors.aes]
kind = "aes"
props = { "aes.key.value" = "123456" }

[[sharding.encrypt.tables]]
name = "t_order"

[[sharding.encrypt.tables.columns]]
logic = "status"
cipher = "status_cipher"
assisted_query = "status_assisted"
encryptor = "aes"
"#;

const ENCRYPT: &str = r#"
[encrypt.encryptors.md5]
kind = "md5"

[[encrypt.tables]]
name = "users"
columns = [{ logic = "ssn", cipher = "ssn_cipher", encryptor = "md5" }]
"#;

fn schema() -> Schema {
    Schema::from_tables([
        TableMetadata::new("t_order", &["user_id", "status"]),
        TableMetadata::new("users", &["ssn"]),
    ])
}

fn rewrite(config: &Config, statement: &Statement) -> String {
    let rule = Rule::from_config(config).unwrap();
    let context = TokenContext::new(statement, &rule)
        .query_with_cipher_column(config.general.query_with_cipher_column);

    TokenGenerators::default()
        .generate(&context)
        .unwrap()
        .iter()
        .map(|token| token.to_string())
        .collect()
}

#[test]
fn test_sharding_without_column_list() {
    logger::init();

    let config = Config::from_toml(SHARDING).unwrap();
    // INSERT INTO t_order () VALUES (?, ?)
    let insert =
        InsertStatement::resolve("t_order", Some(InsertColumnsClause::new(20, &[])), &schema())
            .unwrap();

    assert_eq!(
        rewrite(&config, &insert.into()),
        "(user_id, status_cipher, order_id, status_assisted)"
    );
}

#[test]
fn test_sharding_with_column_list() {
    logger::init();

    let config = Config::from_toml(SHARDING).unwrap();
    // INSERT INTO t_order (user_id, status) VALUES (?, ?)
    let insert = InsertStatement::resolve(
        "t_order",
        Some(InsertColumnsClause::new(35, &["user_id", "status"])),
        &schema(),
    )
    .unwrap();

    assert_eq!(rewrite(&config, &insert.into()), "");
}

#[test]
fn test_encrypt_rule_from_file() {
    logger::init();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ENCRYPT.as_bytes()).unwrap();
    let config = Config::load(file.path()).unwrap();
    let rule = Rule::from_config(&config).unwrap();

    // INSERT INTO users VALUES (?)
    let statement: Statement = InsertStatement::resolve("users", None, &schema())
        .unwrap()
        .into();

    let token = InsertColumnsTokenGenerator
        .generate_token(&statement, &rule)
        .unwrap()
        .unwrap();
    assert_eq!(token.position(), None);
    assert_eq!(token.columns(), &["ssn_cipher"]);
    assert!(token.complete());

    let tokens = TokenGenerators::default()
        .generate(&TokenContext::new(&statement, &rule))
        .unwrap();
    assert!(matches!(tokens.as_slice(), [SqlToken::InsertColumns(_)]));
}

#[test]
fn test_read_write_split_leaves_insert_alone() {
    logger::init();

    let config = Config::from_toml(
        r#"
[read_write_split]
name = "ds"
primary = "primary_ds"
replicas = ["replica_ds_0"]
"#,
    )
    .unwrap();

    let insert = InsertStatement::resolve("users", None, &schema()).unwrap();
    assert_eq!(rewrite(&config, &insert.into()), "");
    assert_eq!(rewrite(&config, &Statement::Select), "");
}
