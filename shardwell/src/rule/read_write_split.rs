use shardwell_config::{ReadWriteSplit, ReadWriteStrategy};

/// Read/write split rule. Routes statements, never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteSplitRule {
    name: String,
    primary: String,
    replicas: Vec<String>,
    strategy: ReadWriteStrategy,
}

impl ReadWriteSplitRule {
    pub fn new(config: &ReadWriteSplit) -> Self {
        Self {
            name: config.name.clone(),
            primary: config.primary.clone(),
            replicas: config.replicas.clone(),
            strategy: config.strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn replicas(&self) -> &[String] {
        &self.replicas
    }

    pub fn strategy(&self) -> ReadWriteStrategy {
        self.strategy
    }
}
