use crate::artifacts::os::windows::tasks::error::ServiceError;
use std::{iter::once, mem::zeroed, ptr::null_mut, slice::from_raw_parts};
use winapi::{
    shared::wtypes::{BSTR, VARTYPE, VT_BSTR, VT_I4},
    um::{
        oaidl::VARIANT,
        oleauto::{SysAllocString, SysFreeString, SysStringLen},
        winnt::HRESULT,
    },
};

/// Owned `BSTR` we pass into the Task Scheduler
pub(crate) struct Bstr(BSTR);

impl Bstr {
    pub(crate) fn new(value: &str) -> Bstr {
        let wide: Vec<u16> = value.encode_utf16().chain(once(0)).collect();
        #[allow(unsafe_code)]
        let raw = unsafe { SysAllocString(wide.as_ptr()) };
        Bstr(raw)
    }

    pub(crate) fn as_raw(&self) -> BSTR {
        self.0
    }
}

impl Drop for Bstr {
    fn drop(&mut self) {
        #[allow(unsafe_code)]
        unsafe {
            SysFreeString(self.0);
        }
    }
}

/// Call a getter that returns a `BSTR` and convert it to a `String`. The `BSTR` is freed
pub(crate) fn read_bstr<F>(call: F) -> Result<String, ServiceError>
where
    F: FnOnce(*mut BSTR) -> HRESULT,
{
    let mut raw: BSTR = null_mut();
    let status = call(&mut raw);
    if status < 0 {
        return Err(ServiceError::Call(status));
    }
    if raw.is_null() {
        return Ok(String::new());
    }

    #[allow(unsafe_code)]
    let value = unsafe {
        let size = SysStringLen(raw) as usize;
        let value = String::from_utf16_lossy(from_raw_parts(raw, size));
        SysFreeString(raw);
        value
    };
    Ok(value)
}

/// `VT_I4` variant used to index Task Scheduler collections
pub(crate) fn int_variant(value: i32) -> VARIANT {
    #[allow(unsafe_code)]
    unsafe {
        let mut variant: VARIANT = zeroed();
        let inner = variant.n1.n2_mut();
        inner.vt = VT_I4 as VARTYPE;
        *inner.n3.lVal_mut() = value;
        variant
    }
}

/// `VT_BSTR` variant borrowing `value`. Empty strings become `VT_EMPTY`
pub(crate) fn string_variant(value: &Bstr) -> VARIANT {
    #[allow(unsafe_code)]
    unsafe {
        let mut variant: VARIANT = zeroed();
        if value.as_raw().is_null() || SysStringLen(value.as_raw()) == 0 {
            return variant;
        }
        let inner = variant.n1.n2_mut();
        inner.vt = VT_BSTR as VARTYPE;
        *inner.n3.bstrVal_mut() = value.as_raw();
        variant
    }
}
