// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! EIP-712 typed structured data hashing.
//!
//! Struct types are declared as an ordered list of `(type, name)` members.
//! The member order is part of the type hash, so it has to match the
//! declaration used by the on-chain verifier exactly.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, B256, I256, U256, keccak256};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EIP712_DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Member {
    pub r#type: String,
    pub name: String,
}

impl Eip712Member {
    pub fn new(r#type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            name: name.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum Eip712Value {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Int(I256),
    /// `bytes1` .. `bytes32`, the length must match the declared size
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Eip712Value>),
    Struct(Eip712Struct),
}

impl From<B256> for Eip712Value {
    fn from(value: B256) -> Self {
        Self::FixedBytes(value.to_vec())
    }
}

impl From<Address> for Eip712Value {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<U256> for Eip712Value {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Eip712Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Member values of one struct instance, looked up by member name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Eip712Struct {
    values: BTreeMap<String, Eip712Value>,
}

impl Eip712Struct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Eip712Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Eip712Value> {
        self.values.get(name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registry of struct type declarations
#[derive(Debug, Clone, Default)]
pub struct Eip712Types {
    structs: BTreeMap<String, Vec<Eip712Member>>,
}

impl Eip712Types {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_struct(mut self, name: impl Into<String>, members: Vec<Eip712Member>) -> Self {
        self.structs.insert(name.into(), members);
        self
    }

    pub fn members(&self, struct_name: &str) -> Result<&[Eip712Member], Eip712Error> {
        self.structs
            .get(struct_name)
            .map(Vec::as_slice)
            .ok_or_else(|| Eip712Error::UnknownType {
                type_name: struct_name.to_string(),
            })
    }

    /// `encodeType`: the primary type followed by all transitively
    /// referenced struct types sorted by name, e.g.
    /// `Mail(Person from,Person to,string contents)Person(string name,address wallet)`
    pub fn encode_type(&self, primary_type: &str) -> Result<String, Eip712Error> {
        let mut dependencies = BTreeSet::new();
        self.collect_dependencies(primary_type, &mut dependencies)?;
        dependencies.remove(primary_type);

        let mut encoded = self.encode_single_type(primary_type)?;
        for dependency in dependencies {
            encoded.push_str(&self.encode_single_type(&dependency)?);
        }

        Ok(encoded)
    }

    pub fn type_hash(&self, primary_type: &str) -> Result<B256, Eip712Error> {
        Ok(keccak256(self.encode_type(primary_type)?.as_bytes()))
    }

    /// `hashStruct(s) = keccak256(typeHash || encodeData(s))`
    pub fn hash_struct(
        &self,
        struct_name: &str,
        value: &Eip712Struct,
    ) -> Result<B256, Eip712Error> {
        let members = self.members(struct_name)?;

        let mut encoder = Eip712Encoder::with_capacity(members.len() + 1);
        encoder.push_word(self.type_hash(struct_name)?);

        for member in members {
            let member_value = value.get(&member.name).ok_or_else(|| Eip712Error::MissingValue {
                struct_name: struct_name.to_string(),
                member_name: member.name.clone(),
            })?;

            encoder.push_word(self.encode_value(&member.r#type, &member.name, member_value)?);
        }

        Ok(keccak256(encoder.finish()))
    }

    fn encode_single_type(&self, struct_name: &str) -> Result<String, Eip712Error> {
        let members = self.members(struct_name)?;

        let members = members
            .iter()
            .map(|m| format!("{} {}", m.r#type, m.name))
            .collect::<Vec<_>>()
            .join(",");

        Ok(format!("{struct_name}({members})"))
    }

    fn collect_dependencies(
        &self,
        struct_name: &str,
        found: &mut BTreeSet<String>,
    ) -> Result<(), Eip712Error> {
        if !found.insert(struct_name.to_string()) {
            return Ok(());
        }

        for member in self.members(struct_name)? {
            let base_type = array_base_type(&member.r#type);
            if self.structs.contains_key(base_type) {
                self.collect_dependencies(base_type, found)?;
            }
        }

        Ok(())
    }

    fn encode_value(
        &self,
        r#type: &str,
        member_name: &str,
        value: &Eip712Value,
    ) -> Result<B256, Eip712Error> {
        let mismatch = || Eip712Error::TypeMismatch {
            member_name: member_name.to_string(),
            expected_type: r#type.to_string(),
        };

        // Arrays: keccak256 of the concatenated element encodings
        if let Some(element_type) = array_element_type(r#type) {
            let Eip712Value::Array(items) = value else {
                return Err(mismatch());
            };

            if array_fixed_len(r#type)?.is_some_and(|fixed_len| fixed_len != items.len()) {
                return Err(mismatch());
            }

            let mut encoder = Eip712Encoder::with_capacity(items.len());
            for item in items {
                encoder.push_word(self.encode_value(element_type, member_name, item)?);
            }

            return Ok(keccak256(encoder.finish()));
        }

        if self.structs.contains_key(r#type) {
            let Eip712Value::Struct(nested) = value else {
                return Err(mismatch());
            };
            return self.hash_struct(r#type, nested);
        }

        match (r#type, value) {
            ("address", Eip712Value::Address(address)) => Ok(address.into_word()),
            ("bool", Eip712Value::Bool(flag)) => Ok(uint_word(U256::from(u8::from(*flag)))),
            ("string", Eip712Value::String(text)) => Ok(keccak256(text.as_bytes())),
            ("bytes", Eip712Value::Bytes(bytes)) => Ok(keccak256(bytes)),
            (_, Eip712Value::FixedBytes(bytes)) if r#type.starts_with("bytes") => {
                let size = parse_bit_size(r#type, "bytes", 1, 32, 1)?;
                if bytes.len() != size {
                    return Err(mismatch());
                }

                let mut word = B256::ZERO;
                word[..size].copy_from_slice(bytes);
                Ok(word)
            }
            (_, Eip712Value::Uint(number)) if r#type.starts_with("uint") => {
                let bits = parse_bit_size(r#type, "uint", 8, 256, 8)?;
                if number.bit_len() > bits {
                    return Err(mismatch());
                }
                Ok(uint_word(*number))
            }
            (_, Eip712Value::Int(number)) if r#type.starts_with("int") => {
                let bits = parse_bit_size(r#type, "int", 8, 256, 8)?;
                // Two's complement must fit into the declared width
                let fits = bits == 256 || {
                    let bound = I256::ONE << (bits - 1);
                    *number >= -bound && *number < bound
                };
                if !fits {
                    return Err(mismatch());
                }
                Ok(uint_word(number.into_raw()))
            }
            _ if is_known_atomic_type(r#type) => Err(mismatch()),
            _ => Err(Eip712Error::UnknownType {
                type_name: r#type.to_string(),
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub const TYPE: &'static str =
        "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

    pub fn separator(&self) -> B256 {
        let mut encoder = Eip712Encoder::with_capacity(5);
        encoder.push_word(keccak256(Self::TYPE.as_bytes()));
        encoder.push_word(keccak256(self.name.as_bytes()));
        encoder.push_word(keccak256(self.version.as_bytes()));
        encoder.push_word(uint_word(U256::from(self.chain_id)));
        encoder.push_word(self.verifying_contract.into_word());

        keccak256(encoder.finish())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `keccak256(0x19 0x01 || domainSeparator || hashStruct(message))`
pub fn hash_typed_data(
    domain: &Eip712Domain,
    types: &Eip712Types,
    primary_type: &str,
    message: &Eip712Struct,
) -> Result<B256, Eip712Error> {
    let struct_hash = types.hash_struct(primary_type, message)?;

    Ok(typed_data_digest(&domain.separator(), &struct_hash))
}

pub fn typed_data_digest(domain_separator: &B256, struct_hash: &B256) -> B256 {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(&EIP712_DIGEST_PREFIX);
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(struct_hash.as_slice());

    keccak256(buf)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Eip712Encoder {
    buf: Vec<u8>,
}

impl Eip712Encoder {
    fn with_capacity(words: usize) -> Self {
        Self {
            buf: Vec::with_capacity(words * 32),
        }
    }

    fn push_word(&mut self, word: B256) {
        self.buf.extend_from_slice(word.as_slice());
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

fn uint_word(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

fn array_element_type(r#type: &str) -> Option<&str> {
    if !r#type.ends_with(']') {
        return None;
    }
    r#type.rfind('[').map(|pos| &r#type[..pos])
}

fn array_fixed_len(r#type: &str) -> Result<Option<usize>, Eip712Error> {
    let Some(pos) = r#type.rfind('[') else {
        return Ok(None);
    };

    let len = &r#type[pos + 1..r#type.len() - 1];
    if len.is_empty() {
        return Ok(None);
    }

    len.parse()
        .map(Some)
        .map_err(|_| Eip712Error::UnknownType {
            type_name: r#type.to_string(),
        })
}

fn array_base_type(r#type: &str) -> &str {
    r#type.find('[').map_or(r#type, |pos| &r#type[..pos])
}

fn parse_bit_size(
    r#type: &str,
    prefix: &str,
    min: usize,
    max: usize,
    step: usize,
) -> Result<usize, Eip712Error> {
    let unknown = || Eip712Error::UnknownType {
        type_name: r#type.to_string(),
    };

    let size: usize = r#type
        .strip_prefix(prefix)
        .ok_or_else(unknown)?
        .parse()
        .map_err(|_| unknown())?;

    if size < min || size > max || size % step != 0 {
        return Err(unknown());
    }

    Ok(size)
}

fn is_known_atomic_type(r#type: &str) -> bool {
    matches!(r#type, "address" | "bool" | "string" | "bytes")
        || parse_bit_size(r#type, "bytes", 1, 32, 1).is_ok()
        || parse_bit_size(r#type, "uint", 8, 256, 8).is_ok()
        || parse_bit_size(r#type, "int", 8, 256, 8).is_ok()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Eip712Error {
    #[error("Unknown EIP-712 type: {type_name}")]
    UnknownType { type_name: String },

    #[error("Missing value for member '{member_name}' of struct '{struct_name}'")]
    MissingValue {
        struct_name: String,
        member_name: String,
    },

    #[error("Value of member '{member_name}' does not match declared type '{expected_type}'")]
    TypeMismatch {
        member_name: String,
        expected_type: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
