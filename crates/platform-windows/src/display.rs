//! Win32 display enumeration behind [`DisplaySource`].

use std::mem::size_of;

use blackout_platform_core::{
    AdapterId, DisplayConfigSnapshot, DisplaySource, MonitorHandle, MonitorRect, ModeKind,
    ModeRecord, PathQueryError, PathRecord, PhysicalSurface, Point,
};
use widestring::U16CStr;
use windows::core::BOOL;
use windows::Win32::Devices::Display::{
    DisplayConfigGetDeviceInfo, GetDisplayConfigBufferSizes, QueryDisplayConfig,
    DISPLAYCONFIG_DEVICE_INFO_GET_TARGET_NAME, DISPLAYCONFIG_DEVICE_INFO_HEADER,
    DISPLAYCONFIG_MODE_INFO, DISPLAYCONFIG_MODE_INFO_TYPE_SOURCE,
    DISPLAYCONFIG_MODE_INFO_TYPE_TARGET, DISPLAYCONFIG_PATH_ACTIVE, DISPLAYCONFIG_PATH_INFO,
    DISPLAYCONFIG_TARGET_DEVICE_NAME, QDC_ALL_PATHS,
};
use windows::Win32::Foundation::{ERROR_SUCCESS, LPARAM, LUID, RECT};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO};

/// The live Win32 display configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32DisplaySource;

impl DisplaySource for Win32DisplaySource {
    fn query_display_config(&self) -> Result<DisplayConfigSnapshot, PathQueryError> {
        let mut path_count = 0u32;
        let mut mode_count = 0u32;
        let status =
            unsafe { GetDisplayConfigBufferSizes(QDC_ALL_PATHS, &mut path_count, &mut mode_count) };
        if status != ERROR_SUCCESS {
            return Err(PathQueryError::BufferSizes { code: status.0 });
        }

        let mut paths = vec![DISPLAYCONFIG_PATH_INFO::default(); path_count as usize];
        let mut modes = vec![DISPLAYCONFIG_MODE_INFO::default(); mode_count as usize];
        let status = unsafe {
            QueryDisplayConfig(
                QDC_ALL_PATHS,
                &mut path_count,
                paths.as_mut_ptr(),
                &mut mode_count,
                modes.as_mut_ptr(),
                None,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(PathQueryError::Query { code: status.0 });
        }
        // The query may report fewer elements than it asked room for.
        paths.truncate(path_count as usize);
        modes.truncate(mode_count as usize);

        Ok(DisplayConfigSnapshot {
            paths: paths.iter().map(path_record).collect(),
            modes: modes.iter().map(mode_record).collect(),
        })
    }

    fn target_friendly_name(&self, adapter_id: AdapterId, target_id: u32) -> Option<String> {
        let mut request = DISPLAYCONFIG_TARGET_DEVICE_NAME {
            header: DISPLAYCONFIG_DEVICE_INFO_HEADER {
                r#type: DISPLAYCONFIG_DEVICE_INFO_GET_TARGET_NAME,
                size: size_of::<DISPLAYCONFIG_TARGET_DEVICE_NAME>() as u32,
                adapterId: LUID {
                    LowPart: adapter_id.low_part,
                    HighPart: adapter_id.high_part,
                },
                id: target_id,
            },
            ..Default::default()
        };

        let status = unsafe { DisplayConfigGetDeviceInfo(&mut request.header) };
        if status != ERROR_SUCCESS.0 as i32 {
            tracing::debug!(target_id, status, "Target name query failed");
            return None;
        }

        U16CStr::from_slice_truncate(&request.monitorFriendlyDeviceName)
            .ok()?
            .to_string()
            .ok()
    }

    fn enumerate_surfaces(&self) -> Vec<PhysicalSurface> {
        let mut surfaces: Vec<PhysicalSurface> = Vec::new();
        // The callback runs synchronously inside this call, so the borrow
        // handed over through LPARAM outlives every invocation.
        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(push_surface),
                LPARAM(&mut surfaces as *mut Vec<PhysicalSurface> as isize),
            )
        };
        if !ok.as_bool() {
            tracing::warn!("EnumDisplayMonitors stopped early");
        }
        surfaces
    }
}

fn adapter_id(luid: LUID) -> AdapterId {
    AdapterId::new(luid.LowPart, luid.HighPart)
}

fn path_record(path: &DISPLAYCONFIG_PATH_INFO) -> PathRecord {
    PathRecord {
        active: path.flags & DISPLAYCONFIG_PATH_ACTIVE != 0,
        adapter_id: adapter_id(path.targetInfo.adapterId),
        target_id: path.targetInfo.id,
        source_id: path.sourceInfo.id,
        source_mode_index: unsafe { path.sourceInfo.Anonymous.modeInfoIdx },
    }
}

fn mode_record(mode: &DISPLAYCONFIG_MODE_INFO) -> ModeRecord {
    let kind = if mode.infoType == DISPLAYCONFIG_MODE_INFO_TYPE_SOURCE {
        let position = unsafe { mode.Anonymous.sourceMode.position };
        ModeKind::Source {
            position: Point::new(position.x, position.y),
        }
    } else if mode.infoType == DISPLAYCONFIG_MODE_INFO_TYPE_TARGET {
        ModeKind::Target
    } else {
        ModeKind::DesktopImage
    };

    ModeRecord {
        kind,
        adapter_id: adapter_id(mode.adapterId),
        id: mode.id,
    }
}

extern "system" fn push_surface(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    state: LPARAM,
) -> BOOL {
    let surfaces = unsafe { &mut *(state.0 as *mut Vec<PhysicalSurface>) };

    let mut info = MONITORINFO {
        cbSize: size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        let rc = info.rcMonitor;
        surfaces.push(PhysicalSurface {
            handle: MonitorHandle::from_raw(monitor.0 as isize),
            geometry: MonitorRect::new(rc.left, rc.top, rc.right, rc.bottom),
        });
    } else {
        tracing::debug!("GetMonitorInfoW failed, skipping monitor");
    }

    true.into()
}
