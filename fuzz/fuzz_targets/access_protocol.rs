#![no_main]

//! Fuzz harness for the confidential access request/callback protocol.
//!
//! Random interleavings of contributions, access checks, genuine and forged
//! deliveries, batch changes and pauses. After every action the decrypted
//! totals must match a plaintext model, and no forged or replayed delivery
//! may ever produce a decision.

use arbitrary::Arbitrary;
use confidential_access::{ConfidentialAccessContract, ConfidentialAccessContractClient, Metric};
use decryption_oracle::{DecryptionOracleContract, DecryptionOracleContractClient};
use fhe_executor::{
    homomorphic::{PaillierPrivateKey, PaillierPublicKey},
    FheExecutorContract, FheExecutorContractClient,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Bytes, Env,
};

const METRICS: [Metric; 4] = [
    Metric::DrivingStyle,
    Metric::RoutePreference,
    Metric::ComfortLevel,
    Metric::AccessScore,
];

/// Actions over every state-changing entry point.
///
/// Values are `u16` so sums stay far below the key modulus.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Submit { values: [u16; 3] },
    UpdateScore { value: u16 },
    Request,
    Deliver { request: u8 },
    DeliverForged { request: u8, byte: u8, mask: u8 },
    OpenBatch,
    CloseBatch,
    Pause,
    Unpause,
    AdvanceTime { delta: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let owner = Address::generate(&env);
    let gateway = Address::generate(&env);

    let executor_id = env.register(FheExecutorContract, ());
    let oracle_id = env.register(DecryptionOracleContract, ());
    let contract_id = env.register(ConfidentialAccessContract, ());
    let executor = FheExecutorContractClient::new(&env, &executor_id);
    let oracle = DecryptionOracleContractClient::new(&env, &oracle_id);
    let client = ConfidentialAccessContractClient::new(&env, &contract_id);

    executor.initialize(
        &owner,
        &PaillierPublicKey {
            n: 4_611_685_975_477_714_963,
            nn: 21_267_647_536_417_843_415_057_699_435_874_091_369,
            g: 4_611_685_975_477_714_964,
        },
        &PaillierPrivateKey {
            lambda: 4_611_685_971_182_747_688,
            mu: 3_540_861_058_557_827_689,
        },
        &oracle_id,
    );
    oracle.initialize(&owner, &executor_id, &gateway);
    if client
        .try_initialize(&owner, &executor_id, &oracle_id, &30u64)
        .is_err()
    {
        return;
    }

    let mut providers = vec![];
    for _ in 0..3 {
        let p = Address::generate(&env);
        client.add_provider(&owner, &p);
        providers.push(p);
    }

    let mut expected = [0u128; 4];
    let mut requests: Vec<u64> = vec![];
    let mut decided: Vec<u64> = vec![];

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &providers[i % providers.len()];
        match action {
            FuzzAction::Submit { values } => {
                let handles = values.map(|v| {
                    let h = executor.encrypt(caller, &u128::from(v));
                    executor.allow(caller, &h, &contract_id);
                    h
                });
                let [d, r, c] = &handles;
                if let Ok(Ok(_)) = client.try_submit_contribution(caller, d, r, c) {
                    expected[0] += u128::from(values[0]);
                    expected[1] += u128::from(values[1]);
                    expected[2] += u128::from(values[2]);
                    expected[3] += u128::from(values[2]);
                }
            }
            FuzzAction::UpdateScore { value } => {
                let h = executor.encrypt(caller, &u128::from(value));
                executor.allow(caller, &h, &contract_id);
                if let Ok(Ok(_)) = client.try_update_access_score(caller, &h) {
                    expected[3] += u128::from(value);
                }
            }
            FuzzAction::Request => {
                if let Ok(Ok(id)) = client.try_request_access_check(caller) {
                    requests.push(id);
                }
            }
            FuzzAction::Deliver { request } => {
                if requests.is_empty() {
                    continue;
                }
                let id = requests[usize::from(request) % requests.len()];
                let response = oracle.fulfill(&gateway, &id);
                let accepted = client
                    .try_on_decryption(&id, &response.cleartexts, &response.proof)
                    .is_ok();
                if accepted {
                    assert!(
                        !decided.contains(&id),
                        "INVARIANT VIOLATION: request {} decided twice",
                        id
                    );
                    decided.push(id);
                }
            }
            FuzzAction::DeliverForged {
                request,
                byte,
                mask,
            } => {
                if requests.is_empty() || mask == 0 {
                    continue;
                }
                let id = requests[usize::from(request) % requests.len()];
                let response = oracle.fulfill(&gateway, &id);
                let index = u32::from(byte) % response.cleartexts.len();
                let mut forged = Bytes::new(&env);
                forged.append(&response.cleartexts);
                let original = forged.get(index).unwrap_or(0);
                forged.set(index, original ^ mask);
                let before = client.get_decision(&id);
                let res = client.try_on_decryption(&id, &forged, &response.proof);
                assert!(res.is_err(), "INVARIANT VIOLATION: forged payload accepted");
                assert_eq!(client.get_decision(&id), before);
            }
            FuzzAction::OpenBatch => {
                let _ = client.try_open_batch(&owner);
            }
            FuzzAction::CloseBatch => {
                let _ = client.try_close_batch(&owner);
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&owner);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&owner);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(u64::from(delta));
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        for (slot, metric) in METRICS.iter().enumerate() {
            let actual = client
                .get_metric_handle(metric)
                .map(|h| executor.decrypt(&oracle_id, &h))
                .unwrap_or(0);
            assert_eq!(
                actual, expected[slot],
                "INVARIANT VIOLATION: {:?} total diverged from contributions",
                metric
            );
        }

        for id in &requests {
            let processed = client
                .get_decryption_context(id)
                .map(|ctx| ctx.processed)
                .unwrap_or(false);
            assert_eq!(
                processed,
                decided.contains(id),
                "INVARIANT VIOLATION: request {} processed flag out of sync",
                id
            );
            if let Some(decision) = client.get_decision(id) {
                let score = decision.totals.access_score.to_u128().unwrap_or(u128::MAX);
                assert_eq!(decision.access_granted, score >= 50);
            }
        }
    }
});
