use facecam::prefs::KeyValueStore;
use objc2::rc::Retained;
use objc2_foundation::{NSString, NSUserDefaults};

/// `NSUserDefaults.standardUserDefaults` behind the store trait.
pub struct UserDefaultsStore {
    defaults: Retained<NSUserDefaults>,
}

impl UserDefaultsStore {
    pub fn standard() -> Self {
        UserDefaultsStore {
            defaults: NSUserDefaults::standardUserDefaults(),
        }
    }

    fn has(&self, key: &NSString) -> bool {
        self.defaults.objectForKey(key).is_some()
    }
}

impl KeyValueStore for UserDefaultsStore {
    fn double(&self, key: &str) -> Option<f64> {
        let key = NSString::from_str(key);
        self.has(&key).then(|| self.defaults.doubleForKey(&key))
    }

    fn bool(&self, key: &str) -> Option<bool> {
        let key = NSString::from_str(key);
        self.has(&key).then(|| self.defaults.boolForKey(&key))
    }

    fn set_double(&self, key: &str, value: f64) {
        self.defaults.setDouble_forKey(value, &NSString::from_str(key));
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.defaults.setBool_forKey(value, &NSString::from_str(key));
    }

    fn remove(&self, key: &str) {
        self.defaults.removeObjectForKey(&NSString::from_str(key));
    }
}
