use pension_staking::{PensionStakingContract, PensionStakingContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

pub const UNIT: i128 = pension_staking::UNIT;
pub const DAY: u64 = 86_400;
pub const START: u64 = 1_000;

pub struct Harness {
    pub env: Env,
    pub client: PensionStakingContractClient<'static>,
    pub admin: Address,
    pub treasury: Address,
    pub native: Address,
}

impl Harness {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

        let native = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let contract_id = env.register(PensionStakingContract, ());
        let client = PensionStakingContractClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        let treasury = Address::generate(&env);
        client.initialize(&admin, &native, &treasury);

        Harness {
            env,
            client,
            admin,
            treasury,
            native,
        }
    }

    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.native).mint(&user, &amount);
        user
    }

    pub fn fund_escrow(&self, amount: i128) {
        let funder = self.funded_user(amount);
        self.client.fund(&funder, &amount);
    }

    pub fn balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.native).balance(who)
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }
}
