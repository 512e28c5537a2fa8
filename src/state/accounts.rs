//! Read-only views over the oracle program's zero-copy accounts.
//!
//! The program lays these accounts out packed, behind an 8 byte Anchor
//! discriminator, so only the leading fields the provisioner needs are decoded.

use anchor_lang::prelude::Pubkey;

use crate::codec::NAME_LEN;
use crate::error::LedgerError;

pub const AGGREGATOR_DISCRIMINATOR: [u8; 8] = [217, 230, 65, 101, 201, 162, 27, 125];
pub const PERMISSION_DISCRIMINATOR: [u8; 8] = [77, 37, 177, 164, 38, 39, 34, 109];
pub const PROGRAM_STATE_DISCRIMINATOR: [u8; 8] = [159, 42, 192, 191, 139, 62, 168, 28];

/// Full size of an aggregator account, discriminator included.
pub const AGGREGATOR_ACCOUNT_SIZE: usize = 3851;

const MAX_JOBS: usize = 16;
// name, metadata, reserved, queue pubkey
const AGGREGATOR_SETTINGS_OFFSET: usize = 8 + 32 + 128 + 32 + 32;
// two AggregatorRound blocks of 1097 bytes sit between the settings and the job list
const AGGREGATOR_JOB_KEYS_OFFSET: usize = 8 + 333 + 2 * 1097;
const AGGREGATOR_JOB_COUNT_OFFSET: usize = AGGREGATOR_JOB_KEYS_OFFSET + MAX_JOBS * 32 * 2;

/// Aggregator settings as resolved by the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorData {
    pub name: [u8; NAME_LEN],
    pub batch_size: u32,
    pub min_oracle_results: u32,
    pub min_job_results: u32,
    pub min_update_delay_seconds: u32,
    pub job_pubkeys: Vec<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionData {
    pub authority: Pubkey,
    pub permissions: u32,
    pub granter: Pubkey,
    pub grantee: Pubkey,
    pub expiration: i64,
}

/// The program's global state; only the token mint matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramStateData {
    pub token_mint: Pubkey,
}

struct AccountReader<'a> {
    address: &'a Pubkey,
    data: &'a [u8],
}

impl<'a> AccountReader<'a> {
    fn new(
        address: &'a Pubkey,
        data: &'a [u8],
        discriminator: [u8; 8],
    ) -> Result<Self, LedgerError> {
        let reader = Self { address, data };
        if reader.bytes::<8>(0)? != discriminator {
            return Err(reader.invalid("discriminator mismatch".to_string()));
        }
        Ok(reader)
    }

    fn invalid(&self, reason: String) -> LedgerError {
        LedgerError::InvalidAccountData {
            address: *self.address,
            reason,
        }
    }

    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N], LedgerError> {
        self.data
            .get(offset..offset + N)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| {
                self.invalid(format!(
                    "needs {} bytes, account holds {}",
                    offset + N,
                    self.data.len()
                ))
            })
    }

    fn pubkey(&self, offset: usize) -> Result<Pubkey, LedgerError> {
        self.bytes::<32>(offset).map(Pubkey::new_from_array)
    }

    fn u32(&self, offset: usize) -> Result<u32, LedgerError> {
        self.bytes::<4>(offset).map(u32::from_le_bytes)
    }

    fn i64(&self, offset: usize) -> Result<i64, LedgerError> {
        self.bytes::<8>(offset).map(i64::from_le_bytes)
    }
}

impl AggregatorData {
    pub fn decode(address: &Pubkey, data: &[u8]) -> Result<Self, LedgerError> {
        let r = AccountReader::new(address, data, AGGREGATOR_DISCRIMINATOR)?;
        let job_count = r.u32(AGGREGATOR_JOB_COUNT_OFFSET)? as usize;
        if job_count > MAX_JOBS {
            return Err(r.invalid(format!("job count {job_count} exceeds {MAX_JOBS}")));
        }
        let job_pubkeys = (0..job_count)
            .map(|i| r.pubkey(AGGREGATOR_JOB_KEYS_OFFSET + i * 32))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: r.bytes::<NAME_LEN>(8)?,
            batch_size: r.u32(AGGREGATOR_SETTINGS_OFFSET)?,
            min_oracle_results: r.u32(AGGREGATOR_SETTINGS_OFFSET + 4)?,
            min_job_results: r.u32(AGGREGATOR_SETTINGS_OFFSET + 8)?,
            min_update_delay_seconds: r.u32(AGGREGATOR_SETTINGS_OFFSET + 12)?,
            job_pubkeys,
        })
    }
}

impl PermissionData {
    pub fn decode(address: &Pubkey, data: &[u8]) -> Result<Self, LedgerError> {
        let r = AccountReader::new(address, data, PERMISSION_DISCRIMINATOR)?;
        Ok(Self {
            authority: r.pubkey(8)?,
            permissions: r.u32(40)?,
            granter: r.pubkey(44)?,
            grantee: r.pubkey(76)?,
            expiration: r.i64(108)?,
        })
    }
}

impl ProgramStateData {
    pub fn decode(address: &Pubkey, data: &[u8]) -> Result<Self, LedgerError> {
        let r = AccountReader::new(address, data, PROGRAM_STATE_DISCRIMINATOR)?;
        Ok(Self {
            token_mint: r.pubkey(40)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{to_name_buffer, to_utf8};

    fn aggregator_bytes(jobs: &[Pubkey]) -> Vec<u8> {
        let mut data = vec![0u8; AGGREGATOR_ACCOUNT_SIZE];
        data[..8].copy_from_slice(&AGGREGATOR_DISCRIMINATOR);
        data[8..40].copy_from_slice(&to_name_buffer("ETH/USD"));
        let settings = AGGREGATOR_SETTINGS_OFFSET;
        for (i, value) in [2u32, 2, 1, 30].iter().enumerate() {
            data[settings + i * 4..settings + i * 4 + 4].copy_from_slice(&value.to_le_bytes());
        }
        for (i, job) in jobs.iter().enumerate() {
            let at = AGGREGATOR_JOB_KEYS_OFFSET + i * 32;
            data[at..at + 32].copy_from_slice(job.as_ref());
        }
        data[AGGREGATOR_JOB_COUNT_OFFSET..AGGREGATOR_JOB_COUNT_OFFSET + 4]
            .copy_from_slice(&(jobs.len() as u32).to_le_bytes());
        data
    }

    #[test]
    fn decodes_aggregator_settings_and_jobs() {
        let address = Pubkey::new_unique();
        let jobs = [Pubkey::new_unique(), Pubkey::new_unique()];
        let decoded = AggregatorData::decode(&address, &aggregator_bytes(&jobs)).unwrap();

        assert_eq!(to_utf8(&decoded.name), "ETH/USD");
        assert_eq!(decoded.batch_size, 2);
        assert_eq!(decoded.min_oracle_results, 2);
        assert_eq!(decoded.min_job_results, 1);
        assert_eq!(decoded.min_update_delay_seconds, 30);
        assert_eq!(decoded.job_pubkeys, jobs.to_vec());
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let address = Pubkey::new_unique();
        let mut data = aggregator_bytes(&[]);
        data[0] ^= 0xff;
        match AggregatorData::decode(&address, &data) {
            Err(LedgerError::InvalidAccountData { address: reported, .. }) => {
                assert_eq!(reported, address)
            }
            other => panic!("Expected InvalidAccountData, got {other:?}"),
        }
    }

    #[test]
    fn rejects_short_permission_account() {
        let address = Pubkey::new_unique();
        let mut data = vec![0u8; 60];
        data[..8].copy_from_slice(&PERMISSION_DISCRIMINATOR);
        assert!(PermissionData::decode(&address, &data).is_err());
    }

    #[test]
    fn decodes_program_state_mint() {
        let address = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut data = vec![0u8; 8 + 32 + 32];
        data[..8].copy_from_slice(&PROGRAM_STATE_DISCRIMINATOR);
        data[40..72].copy_from_slice(mint.as_ref());

        let decoded = ProgramStateData::decode(&address, &data).unwrap();
        assert_eq!(decoded.token_mint, mint);
    }

    #[test]
    fn decodes_permission() {
        let address = Pubkey::new_unique();
        let (authority, granter, grantee) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut data = vec![0u8; 8 + 32 + 4 + 32 + 32 + 8 + 1];
        data[..8].copy_from_slice(&PERMISSION_DISCRIMINATOR);
        data[8..40].copy_from_slice(authority.as_ref());
        data[40..44].copy_from_slice(&2u32.to_le_bytes());
        data[44..76].copy_from_slice(granter.as_ref());
        data[76..108].copy_from_slice(grantee.as_ref());
        data[108..116].copy_from_slice(&(-1i64).to_le_bytes());

        let decoded = PermissionData::decode(&address, &data).unwrap();
        assert_eq!(
            decoded,
            PermissionData { authority, permissions: 2, granter, grantee, expiration: -1 }
        );
    }
}
