use crate::artifacts::os::windows::tasks::error::ServiceError;
use std::{
    marker::PhantomData,
    ops::Deref,
    ptr::{null_mut, NonNull},
};
use winapi::{
    ctypes::c_void,
    shared::winerror::E_POINTER,
    um::{
        combaseapi::{CoInitializeEx, CoUninitialize},
        objbase::COINIT_MULTITHREADED,
        unknwnbase::IUnknown,
        winnt::HRESULT,
    },
    Interface,
};

/// COM initialization for the current thread. `CoUninitialize` runs on drop
pub(crate) struct ComSession {
    // COM initialization is per thread
    _thread: PhantomData<*const ()>,
}

impl ComSession {
    pub(crate) fn initialize() -> Result<ComSession, HRESULT> {
        #[allow(unsafe_code)]
        let status = unsafe { CoInitializeEx(null_mut(), COINIT_MULTITHREADED) };
        // S_FALSE means COM was already initialized. The call still has to be paired
        if status < 0 {
            return Err(status);
        }
        Ok(ComSession {
            _thread: PhantomData,
        })
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        #[allow(unsafe_code)]
        unsafe {
            CoUninitialize();
        }
    }
}

/// Owned COM interface pointer. `Release` runs on drop
pub(crate) struct ComPtr<T: Interface>(NonNull<T>);

impl<T: Interface> ComPtr<T> {
    /// Take ownership of an interface pointer returned through an out parameter
    pub(crate) fn from_call<F>(call: F) -> Result<ComPtr<T>, ServiceError>
    where
        F: FnOnce(*mut *mut T) -> HRESULT,
    {
        let mut raw: *mut T = null_mut();
        let status = call(&mut raw);
        if status < 0 {
            return Err(ServiceError::Call(status));
        }
        match NonNull::new(raw) {
            Some(ptr) => Ok(ComPtr(ptr)),
            None => Err(ServiceError::Call(E_POINTER)),
        }
    }

    /// `QueryInterface` for another interface on the same object
    pub(crate) fn cast<U: Interface>(&self) -> Result<ComPtr<U>, ServiceError> {
        ComPtr::from_call(|out: *mut *mut U| {
            #[allow(unsafe_code)]
            unsafe {
                self.as_unknown()
                    .QueryInterface(&U::uuidof(), out.cast::<*mut c_void>())
            }
        })
    }

    fn as_unknown(&self) -> &IUnknown {
        #[allow(unsafe_code)]
        unsafe {
            &*(self.0.as_ptr() as *const IUnknown)
        }
    }
}

impl<T: Interface> Deref for ComPtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        #[allow(unsafe_code)]
        unsafe {
            self.0.as_ref()
        }
    }
}

impl<T: Interface> Drop for ComPtr<T> {
    fn drop(&mut self) {
        #[allow(unsafe_code)]
        unsafe {
            self.as_unknown().Release();
        }
    }
}
