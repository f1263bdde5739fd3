//! In-process `IMessage` for exercising the COM paths without a host.

use std::ffi::CStr;
use std::ptr;

use vst3::Steinberg::Vst::{IAttributeList, IMessage, IMessageTrait};
use vst3::Steinberg::FIDString;
use vst3::{Class, ComWrapper};

use crate::host::HostMessage;

/// Message with a fixed id and no attributes.
pub(crate) struct TestMessage {
    id: &'static CStr,
}

impl Class for TestMessage {
    type Interfaces = (IMessage,);
}

impl IMessageTrait for TestMessage {
    unsafe fn getMessageID(&self) -> FIDString {
        self.id.as_ptr().cast()
    }

    unsafe fn setMessageID(&self, _id: FIDString) {}

    unsafe fn getAttributes(&self) -> *mut IAttributeList {
        ptr::null_mut()
    }
}

/// Build a counted [`HostMessage`] with the given id.
pub(crate) fn host_message(id: &'static CStr) -> HostMessage {
    let wrapper = ComWrapper::new(TestMessage { id });
    let message = wrapper.to_com_ptr::<IMessage>().unwrap();
    unsafe { HostMessage::from_raw(message.as_ptr()) }.unwrap()
}
