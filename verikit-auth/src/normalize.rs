//! Conversion of SDK-owned objects into transport-safe records.
//!
//! A field the record needs but the SDK object lacks is an error, never a
//! default value.

use verikit_sdk::{AccessToken, Account, LoginType};

use crate::error::NormalizationError;
use crate::models::{AccessTokenRecord, AccountDataRecord, PhoneNumberRecord};

const TOKEN: &str = "access token";
const ACCOUNT: &str = "account";

pub fn normalize_token(token: &dyn AccessToken) -> Result<AccessTokenRecord, NormalizationError> {
    let account_id = required_str(token.account_id(), TOKEN, "accountId")?;
    let token_string = required_str(token.token_string(), TOKEN, "tokenString")?;
    let refresh_date = token
        .refresh_date()
        .ok_or_else(|| NormalizationError::missing(TOKEN, "refreshDate"))?;
    let expiration_date = token
        .expiration_date()
        .ok_or_else(|| NormalizationError::missing(TOKEN, "expirationDate"))?;

    Ok(AccessTokenRecord {
        account_id,
        token_string,
        refresh_date,
        expiration_date,
        last_refresh: token.last_refresh(),
        app_id: token.application_id().map(str::to_string),
        refresh_interval_seconds: token.refresh_interval_seconds(),
    })
}

/// Normalize the account a login of type `mode` produced. Only the contact
/// field for that mode is kept, and it has to be there.
pub fn normalize_account(
    account: &dyn Account,
    mode: LoginType,
) -> Result<AccountDataRecord, NormalizationError> {
    let account_id = required_str(account.id(), ACCOUNT, "accountId")?;

    let record = match mode {
        LoginType::Email => AccountDataRecord {
            account_id,
            email_address: Some(required_str(account.email(), ACCOUNT, "emailAddress")?),
            phone_number: None,
        },
        LoginType::Phone => AccountDataRecord {
            account_id,
            email_address: None,
            phone_number: Some(
                phone_record(account)?
                    .ok_or_else(|| NormalizationError::missing(ACCOUNT, "phoneNumber"))?,
            ),
        },
    };
    Ok(record)
}

/// Normalize an account outside a login, keeping whichever contact fields
/// it has.
pub fn normalize_current_account(
    account: &dyn Account,
) -> Result<AccountDataRecord, NormalizationError> {
    Ok(AccountDataRecord {
        account_id: required_str(account.id(), ACCOUNT, "accountId")?,
        email_address: account
            .email()
            .filter(|email| !email.is_empty())
            .map(str::to_string),
        phone_number: phone_record(account)?,
    })
}

fn phone_record(account: &dyn Account) -> Result<Option<PhoneNumberRecord>, NormalizationError> {
    let Some(phone) = account.phone_number() else {
        return Ok(None);
    };
    if phone.country_code.is_empty() {
        return Err(NormalizationError::missing(ACCOUNT, "phoneNumber.countryCode"));
    }
    if phone.number.is_empty() {
        return Err(NormalizationError::missing(ACCOUNT, "phoneNumber.number"));
    }
    Ok(Some(PhoneNumberRecord {
        country_code: phone.country_code,
        number: phone.number,
    }))
}

fn required_str(
    value: Option<&str>,
    object: &'static str,
    field: &'static str,
) -> Result<String, NormalizationError> {
    value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NormalizationError::missing(object, field))
}
