//! Proptest strategies for model types.

use proptest::collection;
use proptest::option;
use proptest::prelude::*;

use crate::limits::MAX_PATH_LEN;
use crate::model::{
    AccountId, AllowTrustOp, Amount, ChangeTrustOp, CreateOfferOp, Currency, CurrencyCode, Memo,
    Operation, OperationBody, PaymentOp, Price, SetOptionsOp, Signer, Thresholds,
};

pub fn account_id() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>().prop_map(AccountId::from_public_key)
}

pub fn currency_code() -> impl Strategy<Value = CurrencyCode> {
    "[A-Za-z0-9]{1,4}".prop_map(|code| CurrencyCode::new(&code).unwrap())
}

pub fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Native),
        (currency_code(), account_id()).prop_map(|(code, issuer)| Currency::issued(code, issuer)),
    ]
}

pub fn path() -> impl Strategy<Value = Vec<Currency>> {
    collection::vec(currency(), 0..=MAX_PATH_LEN)
}

pub fn amount() -> impl Strategy<Value = Amount> {
    (0..=i64::MAX).prop_map(|v| Amount::new(v).unwrap())
}

pub fn positive_amount() -> impl Strategy<Value = i64> {
    1..=i64::MAX
}

pub fn memo() -> impl Strategy<Value = Memo> {
    any::<[u8; 32]>()
}

prop_compose! {
    pub fn payment_op()(
        destination in account_id(),
        currency in currency(),
        path in path(),
        amount in amount(),
        send_max in amount(),
        source_memo in memo(),
        payment_memo in memo(),
    ) -> PaymentOp {
        PaymentOp { destination, currency, path, amount, send_max, source_memo, memo: payment_memo }
    }
}

prop_compose! {
    pub fn create_offer_op()(
        taker_gets in currency(),
        taker_pays in currency(),
        amount in amount(),
        n in 1..=i32::MAX,
        d in 1..=i32::MAX,
        offer_id in any::<u64>(),
    ) -> CreateOfferOp {
        CreateOfferOp { taker_gets, taker_pays, amount, price: Price::new(n, d), offer_id }
    }
}

prop_compose! {
    pub fn set_options_op()(
        inflation_dest in option::of(account_id()),
        clear_flags in option::of(any::<u32>()),
        set_flags in option::of(any::<u32>()),
        thresholds in option::of(any::<[u8; 4]>().prop_map(Thresholds::from_bytes)),
        signer in option::of((account_id(), any::<u32>())
            .prop_map(|(pub_key, weight)| Signer { pub_key, weight })),
    ) -> SetOptionsOp {
        SetOptionsOp { inflation_dest, clear_flags, set_flags, thresholds, signer }
    }
}

prop_compose! {
    pub fn change_trust_op()(line in currency(), limit in amount()) -> ChangeTrustOp {
        ChangeTrustOp { line, limit }
    }
}

prop_compose! {
    pub fn allow_trust_op()(
        trustor in account_id(),
        code in currency_code(),
        authorize in any::<bool>(),
    ) -> AllowTrustOp {
        AllowTrustOp { trustor, code, authorize }
    }
}

pub fn operation_body() -> impl Strategy<Value = OperationBody> {
    prop_oneof![
        payment_op().prop_map(OperationBody::Payment),
        create_offer_op().prop_map(OperationBody::CreateOffer),
        set_options_op().prop_map(OperationBody::SetOptions),
        change_trust_op().prop_map(OperationBody::ChangeTrust),
        allow_trust_op().prop_map(OperationBody::AllowTrust),
    ]
}

prop_compose! {
    pub fn operation()(
        source_account in option::of(account_id()),
        body in operation_body(),
    ) -> Operation {
        Operation { source_account, body }
    }
}
