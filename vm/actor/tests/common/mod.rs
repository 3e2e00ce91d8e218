// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use actor::multisig;
use address::Address;
use cid::{new_from_cbor, Cid, Code::Blake2b256};
use clock::ChainEpoch;
use encoding::{de::DeserializeOwned, Cbor};
use ipld_blockstore::BlockStore;
use message::{Message, UnsignedMessage};
use runtime::{ActorCode, Runtime};
use std::cell::RefCell;
use std::collections::VecDeque;
use vm::{ActorError, ExitCode, MethodNum, Serialized, TokenAmount};

/// Scripted runtime for actor unit tests. Caller validations and sends are
/// declared up front with the `expect_*` methods and checked as the actor
/// runs; `verify` asserts that every expectation was consumed.
pub struct MockRuntime<'a, BS: BlockStore> {
    pub epoch: ChainEpoch,
    pub caller_type: Cid,
    pub message: UnsignedMessage,

    // Actor state
    pub state: Option<Cid>,
    pub balance: TokenAmount,

    // VM impl
    pub store: &'a BS,
    pub in_call: bool,
    pub in_transaction: bool,

    // Expectations
    pub expect_validate_caller_addr: RefCell<Option<Vec<Address>>>,
    pub expect_validate_caller_type: RefCell<Option<Vec<Cid>>>,
    pub expect_sends: VecDeque<ExpectedMessage>,
}

#[derive(Clone, Debug)]
pub struct ExpectedMessage {
    pub to: Address,
    pub method: MethodNum,
    pub params: Serialized,
    pub value: TokenAmount,

    // result of applying the expected message
    pub send_return: Serialized,
    pub exit_code: ExitCode,
}

impl<'a, BS: BlockStore> MockRuntime<'a, BS> {
    pub fn new(store: &'a BS, message: UnsignedMessage) -> Self {
        Self {
            epoch: 0,
            caller_type: new_from_cbor(&[], Blake2b256),
            message,
            state: None,
            balance: TokenAmount::from(0),
            store,
            in_call: false,
            in_transaction: false,
            expect_validate_caller_addr: RefCell::new(None),
            expect_validate_caller_type: RefCell::new(None),
            expect_sends: VecDeque::new(),
        }
    }

    fn require_in_call(&self) {
        assert!(
            self.in_call,
            "invalid runtime invocation outside of method call"
        );
    }

    fn put<C: Cbor>(&self, obj: &C) -> Cid {
        self.store.put(obj, Blake2b256).unwrap()
    }

    pub fn get_state<T: DeserializeOwned>(&self) -> T {
        self.store
            .get(self.state.as_ref().expect("state not constructed"))
            .unwrap()
            .expect("state missing from store")
    }

    pub fn expect_validate_caller_addr(&self, addrs: &[Address]) {
        assert!(!addrs.is_empty(), "addrs must be non-empty");
        *self.expect_validate_caller_addr.borrow_mut() = Some(addrs.to_vec());
    }

    pub fn expect_validate_caller_type(&self, types: &[Cid]) {
        assert!(!types.is_empty(), "types must be non-empty");
        *self.expect_validate_caller_type.borrow_mut() = Some(types.to_vec());
    }

    #[allow(dead_code)]
    pub fn expect_send(
        &mut self,
        to: Address,
        method: MethodNum,
        params: Serialized,
        value: TokenAmount,
        send_return: Serialized,
        exit_code: ExitCode,
    ) {
        self.expect_sends.push_back(ExpectedMessage {
            to,
            method,
            params,
            value,
            send_return,
            exit_code,
        });
    }

    /// Sets the caller address and actor code for the next call.
    pub fn set_caller(&mut self, code_id: Cid, address: Address) {
        self.message = UnsignedMessage::builder()
            .to(*self.message.to())
            .from(address)
            .value(self.message.value().clone())
            .build()
            .unwrap();
        self.caller_type = code_id;
    }

    /// Sets the value carried by the next message.
    pub fn set_received(&mut self, value: TokenAmount) {
        self.message = UnsignedMessage::builder()
            .to(*self.message.to())
            .from(*self.message.from())
            .value(value)
            .build()
            .unwrap();
    }

    /// Invokes a multisig actor method. On error the pre-call state root is
    /// restored, mirroring the VM's abort semantics.
    pub fn call(
        &mut self,
        method_num: MethodNum,
        params: &Serialized,
    ) -> Result<Serialized, ActorError> {
        self.in_call = true;
        let prev_state = self.state;
        let res = multisig::Actor.invoke_method(self, method_num, params);
        if res.is_err() {
            self.state = prev_state;
        }
        self.in_call = false;
        res
    }

    /// Asserts that all declared expectations were consumed and resets them.
    pub fn verify(&mut self) {
        assert!(
            self.expect_validate_caller_addr.borrow().is_none(),
            "expected validate caller addr {:?}, not received",
            self.expect_validate_caller_addr.borrow()
        );
        assert!(
            self.expect_validate_caller_type.borrow().is_none(),
            "expected validate caller type {:?}, not received",
            self.expect_validate_caller_type.borrow()
        );
        assert!(
            self.expect_sends.is_empty(),
            "expected sends were not performed: {:?}",
            self.expect_sends
        );
        self.reset();
    }

    pub fn reset(&mut self) {
        *self.expect_validate_caller_addr.borrow_mut() = None;
        *self.expect_validate_caller_type.borrow_mut() = None;
        self.expect_sends.clear();
    }
}

/// Shorthand for asserting the exit code of a call result.
#[allow(dead_code)]
pub fn expect_abort(code: ExitCode, res: Result<Serialized, ActorError>) {
    let err = res.expect_err("expected actor call to fail");
    assert_eq!(err.exit_code(), code, "unexpected exit code: {}", err);
}

impl<BS: BlockStore> Runtime<BS> for MockRuntime<'_, BS> {
    fn message(&self) -> &UnsignedMessage {
        self.require_in_call();
        &self.message
    }

    fn curr_epoch(&self) -> ChainEpoch {
        self.require_in_call();
        self.epoch
    }

    fn validate_immediate_caller_is<'b, I>(&self, addresses: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'b Address>,
    {
        self.require_in_call();
        let addrs: Vec<Address> = addresses.into_iter().copied().collect();

        let expected = self
            .expect_validate_caller_addr
            .borrow_mut()
            .take()
            .expect("unexpected validate caller addrs");
        assert_eq!(
            addrs, expected,
            "unexpected validate caller addrs {:?}, expected {:?}",
            addrs, expected
        );

        if addrs.contains(self.message().from()) {
            return Ok(());
        }
        Err(ActorError::new(
            ExitCode::SysErrForbidden,
            format!(
                "caller address {} forbidden, allowed: {:?}",
                self.message().from(),
                addrs
            ),
        ))
    }

    fn validate_immediate_caller_type<'b, I>(&self, types: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'b Cid>,
    {
        self.require_in_call();
        let types: Vec<Cid> = types.into_iter().copied().collect();

        let expected = self
            .expect_validate_caller_type
            .borrow_mut()
            .take()
            .expect("unexpected validate caller type");
        assert_eq!(
            types, expected,
            "unexpected validate caller types {:?}, expected {:?}",
            types, expected
        );

        if types.contains(&self.caller_type) {
            return Ok(());
        }
        Err(ActorError::new(
            ExitCode::SysErrForbidden,
            format!(
                "caller type {:?} forbidden, allowed: {:?}",
                self.caller_type, types
            ),
        ))
    }

    fn current_balance(&self) -> Result<TokenAmount, ActorError> {
        self.require_in_call();
        Ok(self.balance.clone())
    }

    fn create<C: Cbor>(&mut self, obj: &C) -> Result<(), ActorError> {
        if self.state.is_some() {
            return Err(self.abort(ExitCode::SysErrIllegalActor, "state already constructed"));
        }
        self.state = Some(self.put(obj));
        Ok(())
    }

    fn state<C: Cbor>(&self) -> Result<C, ActorError> {
        Ok(self.get_state())
    }

    fn transaction<C, R, F>(&mut self, f: F) -> Result<R, ActorError>
    where
        C: Cbor,
        F: FnOnce(&mut C, &BS) -> Result<R, ActorError>,
    {
        if self.in_transaction {
            return Err(self.abort(ExitCode::SysErrIllegalActor, "nested transaction"));
        }
        let mut state: C = self.state()?;
        self.in_transaction = true;
        let res = f(&mut state, self.store);
        if res.is_ok() {
            self.state = Some(self.put(&state));
        }
        self.in_transaction = false;
        res
    }

    fn store(&self) -> &BS {
        self.store
    }

    fn send(
        &mut self,
        to: &Address,
        method: MethodNum,
        params: &Serialized,
        value: &TokenAmount,
    ) -> Result<Serialized, ActorError> {
        self.require_in_call();
        if self.in_transaction {
            return Err(self.abort(ExitCode::SysErrIllegalActor, "side-effect within transaction"));
        }

        let expected = self
            .expect_sends
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected send to {} method {}", to, method));

        assert!(
            &expected.to == to
                && expected.method == method
                && &expected.params == params
                && &expected.value == value,
            "send does not match expectation.\nsent    : to {} method {} value {} params {:?}\nexpected: to {} method {} value {} params {:?}",
            to, method, value, params, expected.to, expected.method, expected.value, expected.params
        );

        if value > &self.balance {
            return Err(self.abort(
                ExitCode::SysErrSenderStateInvalid,
                format!("cannot send value {} exceeding balance {}", value, self.balance),
            ));
        }
        self.balance -= value;

        match expected.exit_code {
            ExitCode::Ok => Ok(expected.send_return),
            code => Err(ActorError::new(code, "expected message failure".to_owned())),
        }
    }

    fn abort<S: AsRef<str>>(&self, exit_code: ExitCode, msg: S) -> ActorError {
        ActorError::new(exit_code, msg.as_ref().to_owned())
    }
}
