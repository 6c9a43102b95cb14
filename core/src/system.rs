use sweepr_common::error::SweepError;

/// Raw ICMP sockets need an effective root user. Checked once, before resolution.
pub fn ensure_privileged() -> Result<(), SweepError> {
    if is_root::is_root() {
        Ok(())
    } else {
        Err(SweepError::Privilege)
    }
}
