//! The deployment directive list of the project

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use tracing::info;

use crate::{
    artifacts::ArtifactResolver,
    constants::{
        BLOCK_HEIGHT_ACCOUNT_INDEX, BLOCK_HEIGHT_CONTRACT, TOKEN_CONTRACT, TOKEN_DEPLOY_VALUE,
    },
    deploy::{AccountProvider, Deployer, Deployment},
    errors::ScriptError,
};

/// One contract to deploy
#[derive(Debug, Clone, PartialEq)]
pub struct DeployDirective {
    /// Name of the artifact to deploy
    pub artifact: &'static str,
    /// Constructor arguments
    pub args: Vec<DynSolValue>,
    /// Value sent along the creation
    pub value: Option<U256>,
}

/// Build the ordered list of deployments, given the node accounts
pub fn plan(accounts: &[Address]) -> Result<Vec<DeployDirective>, ScriptError> {
    let block_height_account = accounts.get(BLOCK_HEIGHT_ACCOUNT_INDEX).copied().ok_or(
        ScriptError::AccountIndexOutOfRange {
            index: BLOCK_HEIGHT_ACCOUNT_INDEX,
            available: accounts.len(),
        },
    )?;

    Ok(vec![
        DeployDirective {
            artifact: BLOCK_HEIGHT_CONTRACT,
            args: vec![DynSolValue::Address(block_height_account)],
            value: None,
        },
        DeployDirective {
            artifact: TOKEN_CONTRACT,
            args: vec![],
            value: Some(TOKEN_DEPLOY_VALUE),
        },
    ])
}

/// Run the whole migration: fetch the accounts, then deploy every directive in order
pub async fn run<P, R, D>(
    account_provider: &P,
    resolver: &R,
    deployer: &D,
) -> Result<Vec<Deployment>, ScriptError>
where
    P: AccountProvider,
    R: ArtifactResolver,
    D: Deployer,
{
    let accounts = account_provider.accounts().await?;
    info!("Node returned {} accounts", accounts.len());

    let directives = plan(&accounts)?;

    // Every artifact is resolved before the first deployment is sent
    let artifacts = directives
        .iter()
        .map(|directive| resolver.resolve(directive.artifact))
        .collect::<Result<Vec<_>, _>>()?;

    let mut deployments = Vec::with_capacity(directives.len());
    for (artifact, directive) in artifacts.iter().zip(&directives) {
        deployments.push(deployer.deploy(artifact, directive).await?);
    }

    Ok(deployments)
}

#[cfg(test)]
mod tests {
    use std::{str::FromStr, sync::Mutex};

    use alloy::primitives::{bytes, B256};

    use super::*;
    use crate::artifacts::Artifact;

    /// A fake node, recording every deployment request
    #[derive(Default)]
    struct MockChain {
        /// Accounts returned by the node
        accounts: Vec<Address>,
        /// Whether fetching the accounts fails
        fail_accounts: bool,
        /// Artifact whose deployment fails
        fail_on: Option<&'static str>,
        /// Every deployment requested so far
        requests: Mutex<Vec<DeployDirective>>,
    }

    impl MockChain {
        /// A node with `count` accounts, account `i` ending in byte `i`
        fn with_accounts(count: u8) -> Self {
            Self {
                accounts: (0..count).map(Address::with_last_byte).collect(),
                ..Default::default()
            }
        }

        /// The deployments requested so far
        fn requests(&self) -> Vec<DeployDirective> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl AccountProvider for MockChain {
        async fn accounts(&self) -> Result<Vec<Address>, ScriptError> {
            if self.fail_accounts {
                return Err(ScriptError::AccountFetching("connection refused".to_string()));
            }
            Ok(self.accounts.clone())
        }
    }

    impl Deployer for MockChain {
        async fn deploy(
            &self,
            artifact: &Artifact,
            directive: &DeployDirective,
        ) -> Result<Deployment, ScriptError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(directive.clone());
            if self.fail_on == Some(directive.artifact) {
                return Err(ScriptError::ContractDeployment("insufficient funds".to_string()));
            }

            let id = requests.len() as u8;
            Ok(Deployment {
                name: artifact.name.clone(),
                address: Address::with_last_byte(0xc0 + id),
                tx_hash: B256::with_last_byte(id),
            })
        }
    }

    /// Resolves every name except `missing`
    struct MockResolver {
        /// Name that fails to resolve
        missing: Option<&'static str>,
    }

    impl ArtifactResolver for MockResolver {
        fn resolve(&self, name: &str) -> Result<Artifact, ScriptError> {
            if self.missing == Some(name) {
                return Err(ScriptError::ArtifactResolution(name.to_string()));
            }
            Ok(Artifact {
                name: name.to_string(),
                bytecode: bytes!("6080"),
            })
        }
    }

    /// Resolver knowing every artifact
    const RESOLVER: MockResolver = MockResolver { missing: None };

    #[tokio::test]
    async fn deploys_block_height_then_token() {
        let chain = MockChain::with_accounts(12);

        let deployments = run(&chain, &RESOLVER, &chain).await.unwrap();

        let requests = chain.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].artifact, "Ethereum934");
        assert_eq!(requests[0].args, vec![DynSolValue::Address(Address::with_last_byte(9))]);
        assert_eq!(requests[0].value, None);
        assert_eq!(requests[1].artifact, "BismuthCoin");
        assert!(requests[1].args.is_empty());
        assert_eq!(
            requests[1].value,
            Some(U256::from_str("15000000000000000000").unwrap())
        );

        let names: Vec<_> = deployments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Ethereum934", "BismuthCoin"]);
    }

    #[tokio::test]
    async fn exactly_ten_accounts_is_enough() {
        let chain = MockChain::with_accounts(10);

        run(&chain, &RESOLVER, &chain).await.unwrap();

        assert_eq!(
            chain.requests()[0].args,
            vec![DynSolValue::Address(Address::with_last_byte(9))]
        );
    }

    #[tokio::test]
    async fn short_account_list_deploys_nothing() {
        let chain = MockChain::with_accounts(5);

        let err = run(&chain, &RESOLVER, &chain).await.unwrap_err();

        assert_eq!(
            err,
            ScriptError::AccountIndexOutOfRange {
                index: 9,
                available: 5
            }
        );
        assert!(chain.requests().is_empty());
    }

    #[tokio::test]
    async fn account_fetch_failure_is_propagated() {
        let chain = MockChain {
            fail_accounts: true,
            ..MockChain::with_accounts(10)
        };

        let err = run(&chain, &RESOLVER, &chain).await.unwrap_err();

        assert!(matches!(err, ScriptError::AccountFetching(_)));
        assert!(chain.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_artifact_deploys_nothing() {
        let chain = MockChain::with_accounts(10);
        let resolver = MockResolver {
            missing: Some("BismuthCoin"),
        };

        let err = run(&chain, &resolver, &chain).await.unwrap_err();

        assert!(matches!(err, ScriptError::ArtifactResolution(_)));
        assert!(chain.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_deployment_stops_the_migration() {
        let chain = MockChain {
            fail_on: Some("Ethereum934"),
            ..MockChain::with_accounts(10)
        };

        let err = run(&chain, &RESOLVER, &chain).await.unwrap_err();

        assert!(matches!(err, ScriptError::ContractDeployment(_)));
        assert_eq!(chain.requests().len(), 1);
    }

    #[test]
    fn plan_never_repeats_a_contract() {
        let accounts: Vec<_> = (0..10).map(Address::with_last_byte).collect();

        let directives = plan(&accounts).unwrap();

        let mut names: Vec<_> = directives.iter().map(|d| d.artifact).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), directives.len());
    }
}
